use serde::Deserialize;

pub const DEFAULT_MAX_DEPTH: u8 = 3;
pub const DEFAULT_SCORE_BOUND: i32 = 10_000;

/// Engine settings, passed explicitly to every component that needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper limit on search plies below each root move.
    pub max_depth: u8,
    /// Initial alpha/beta sentinels, see [`EngineConfig::bound`].
    pub score_bound: i32,
    /// Emit per-search diagnostics at debug level.
    pub log_search: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            score_bound: DEFAULT_SCORE_BOUND,
            log_search: false,
        }
    }
}

impl EngineConfig {
    /// Magnitude of the alpha/beta sentinels. Negative values are taken by
    /// absolute value and `i32::MIN` saturates, so `-bound()` never overflows.
    pub fn bound(&self) -> i32 {
        self.score_bound.saturating_abs()
    }
}

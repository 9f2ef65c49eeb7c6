use std::ops::{BitOr, BitOrAssign};

/// One of the eight compass directions, in grid index steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    flag: u8,
    step: isize,
}

impl Direction {
    pub const LEFT: Direction = Direction::new(0, -10);
    pub const UPPER_LEFT: Direction = Direction::new(1, -11);
    pub const UPPER: Direction = Direction::new(2, -1);
    pub const UPPER_RIGHT: Direction = Direction::new(3, 9);
    pub const RIGHT: Direction = Direction::new(4, 10);
    pub const LOWER_RIGHT: Direction = Direction::new(5, 11);
    pub const LOWER: Direction = Direction::new(6, 1);
    pub const LOWER_LEFT: Direction = Direction::new(7, -9);

    pub const ALL: [Direction; 8] = [
        Self::LEFT,
        Self::UPPER_LEFT,
        Self::UPPER,
        Self::UPPER_RIGHT,
        Self::RIGHT,
        Self::LOWER_RIGHT,
        Self::LOWER,
        Self::LOWER_LEFT,
    ];

    const fn new(bit: u8, step: isize) -> Self {
        Self {
            flag: 1 << bit,
            step,
        }
    }

    /// Flat index offset on the 10x10 grid (`index = x * 10 + y`).
    pub fn step(self) -> isize {
        self.step
    }
}

/// Set of capture directions for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Directions(u8);

impl Directions {
    pub const NONE: Directions = Directions(0);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.flag != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.flag;
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        Self(direction.flag)
    }
}

impl BitOr<Direction> for Directions {
    type Output = Directions;

    fn bitor(mut self, rhs: Direction) -> Directions {
        self.insert(rhs);
        self
    }
}

impl BitOr for Directions {
    type Output = Directions;

    fn bitor(self, rhs: Directions) -> Directions {
        Directions(self.0 | rhs.0)
    }
}

impl BitOrAssign<Direction> for Directions {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.insert(rhs);
    }
}

use std::fmt;

/// One of the four compass directions a cell can be open toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The bit this direction occupies in an [`Openings`] mask.
    pub const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate offset `(dx, dy)` of the neighbor in this direction.
    /// `y` grows downward, so north is `-1`.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// Set of directions a cell is open toward. Empty means fully walled.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Openings(u8);

impl Openings {
    pub const NONE: Openings = Openings(0);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of open sides, between 0 and 4.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl std::ops::BitOr for Openings {
    type Output = Openings;

    fn bitor(self, rhs: Openings) -> Openings {
        Openings(self.0 | rhs.0)
    }
}

impl From<Direction> for Openings {
    fn from(direction: Direction) -> Self {
        Openings(direction.bit())
    }
}

//! Travel quadrant of a ray, picked from the signs of its direction cosines.
//!
//! `y` grows south, so a heading of `+π/2` travels south.

/// One of the four cardinal grid-line directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next lower integer `y`.
    North,
    /// Next higher integer `x`.
    East,
    /// Next higher integer `y`.
    South,
    /// Next lower integer `x`.
    West,
}

impl Direction {
    /// True for the directions that cross integer `x` lines.
    pub fn crosses_x_lines(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `cos >= 0, sin >= 0`
    SouthEast = 0,
    /// `cos <= 0, sin >= 0`
    SouthWest = 1,
    /// `cos <= 0, sin <= 0`
    NorthWest = 2,
    /// `cos >= 0, sin <= 0`
    NorthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::SouthEast,
        Quadrant::SouthWest,
        Quadrant::NorthWest,
        Quadrant::NorthEast,
    ];

    /// Classifies a heading. Angles exactly on an axis satisfy two arms and
    /// take the lower-numbered quadrant, since the arms are tested in order.
    /// Non-finite angles fall through to `NorthEast`.
    pub fn from_angle(radians: f64) -> Self {
        let (y, x) = radians.sin_cos();
        if x >= 0.0 && y >= 0.0 {
            Quadrant::SouthEast
        } else if x <= 0.0 && y >= 0.0 {
            Quadrant::SouthWest
        } else if x <= 0.0 && y <= 0.0 {
            Quadrant::NorthWest
        } else {
            Quadrant::NorthEast
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// The two grid-line directions consistent with travel in this quadrant,
    /// the `x`-crossing one first.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Quadrant::SouthEast => [Direction::East, Direction::South],
            Quadrant::SouthWest => [Direction::West, Direction::South],
            Quadrant::NorthWest => [Direction::West, Direction::North],
            Quadrant::NorthEast => [Direction::East, Direction::North],
        }
    }
}

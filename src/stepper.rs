//! Line stepping: walks a fixed ray `y = m·x + b` from one grid-line
//! crossing to the next until the crossing touches a solid cell.
//!
//! Unlike cell-by-cell DDA, each step intersects the ray with the next
//! integer line in the two directions the quadrant allows and moves to the
//! nearer intersection. Every step crosses a line further along its axis
//! than the last one, so a closed grid bounds the walk by `W + H` steps.

use crate::error::CastError;
use crate::geometry::Point;
use crate::grid::GridMap;
use crate::quadrant::{Direction, Quadrant};
use crate::wall::{self, WallHit};

/// Slope of a ray in grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    Finite(f64),
    /// `cos(heading) == 0`: the ray follows a constant-`x` line.
    Vertical,
}

impl Slope {
    pub fn from_angle(radians: f64) -> Self {
        if radians.cos() == 0.0 {
            return Slope::Vertical;
        }
        let m = radians.tan();
        if m.is_finite() {
            Slope::Finite(m)
        } else {
            Slope::Vertical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub slope: Slope,
    pub quadrant: Quadrant,
}

impl Ray {
    pub fn new(origin: Point, radians: f64) -> Self {
        Self {
            origin,
            slope: Slope::from_angle(radians),
            quadrant: Quadrant::from_angle(radians),
        }
    }

    pub fn cast(&self, grid: &GridMap) -> Result<WallHit, CastError> {
        step(grid, self.origin, self.slope, self.quadrant)
    }
}

/// Upper bound on crossings a ray can make inside `grid`.
pub fn step_limit(grid: &GridMap) -> usize {
    grid.width() + grid.height()
}

/// Advances from `origin` along the ray until a wall face is reached.
///
/// `origin` itself is never classified; the first candidate checked is the
/// first crossing strictly past it.
pub fn step(
    grid: &GridMap,
    origin: Point,
    slope: Slope,
    quadrant: Quadrant,
) -> Result<WallHit, CastError> {
    walk(grid, origin, slope, quadrant, step_limit(grid))
}

fn walk(
    grid: &GridMap,
    origin: Point,
    slope: Slope,
    quadrant: Quadrant,
    limit: usize,
) -> Result<WallHit, CastError> {
    let [across_x, across_y] = quadrant.directions();

    let mut point = origin;
    for _ in 0..limit {
        let a = crossing(point, slope, across_x);
        let b = crossing(point, slope, across_y);
        point = match (a, b) {
            (Some(a), Some(b)) => {
                if point.distance(a) < point.distance(b) {
                    a
                } else {
                    b
                }
            }
            (Some(p), None) | (None, Some(p)) => p,
            (None, None) => return Err(CastError::NoCandidate { at: point }),
        };

        if let Some(hit) = wall::classify(grid, point) {
            return Ok(hit);
        }
    }

    Err(CastError::StepLimit { origin, limit })
}

/// Intersection of the ray through `point` with the next integer line in
/// `direction`, or `None` when the ray runs parallel to that line.
fn crossing(point: Point, slope: Slope, direction: Direction) -> Option<Point> {
    let next = match direction {
        Direction::North => (point.y - 1.0).ceil(),
        Direction::East => (point.x + 1.0).floor(),
        Direction::South => (point.y + 1.0).floor(),
        Direction::West => (point.x - 1.0).ceil(),
    };

    let p = match (slope, direction.crosses_x_lines()) {
        (Slope::Vertical, true) => return None,
        (Slope::Vertical, false) => Point::new(point.x, next),
        (Slope::Finite(m), true) => {
            let b = point.y - m * point.x;
            Point::new(next, m * next + b)
        }
        (Slope::Finite(m), false) => {
            if m == 0.0 {
                return None;
            }
            let b = point.y - m * point.x;
            Point::new((next - b) / m, next)
        }
    };

    (p.x.is_finite() && p.y.is_finite()).then_some(p)
}

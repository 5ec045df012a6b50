use crate::geometry::Point;
use crate::grid::{GridMap, cell_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Face lying on an integer `y` line.
    Horizontal,
    /// Face lying on an integer `x` line.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub point: Point,
    pub orientation: Orientation,
    /// Fractional position along the face, in `[0, 1)`.
    pub texture_offset: f64,
}

/// Classifies a point produced by the line stepper. At a grid corner both
/// faces may be solid; the horizontal face wins.
pub fn classify(grid: &GridMap, point: Point) -> Option<WallHit> {
    let (orientation, along) = if horizontal_hit(grid, point) {
        (Orientation::Horizontal, point.x)
    } else if vertical_hit(grid, point) {
        (Orientation::Vertical, point.y)
    } else {
        return None;
    };

    Some(WallHit {
        point,
        orientation,
        texture_offset: fraction(along),
    })
}

/// `point` lies on an integer `y` line with a solid cell on either side.
pub fn horizontal_hit(grid: &GridMap, point: Point) -> bool {
    on_line(point.y)
        && straddles_solid(grid, point, |x, y| [(x, y), (x, y.wrapping_sub(1))])
}

/// `point` lies on an integer `x` line with a solid cell on either side.
pub fn vertical_hit(grid: &GridMap, point: Point) -> bool {
    on_line(point.x)
        && straddles_solid(grid, point, |x, y| [(x, y), (x.wrapping_sub(1), y)])
}

#[inline]
fn on_line(v: f64) -> bool {
    v == v.floor()
}

fn straddles_solid(
    grid: &GridMap,
    point: Point,
    cells: impl Fn(usize, usize) -> [(usize, usize); 2],
) -> bool {
    // A point off the table is treated as touching the boundary wall.
    let (Some(cx), Some(cy)) = (cell_index(point.x), cell_index(point.y)) else {
        return true;
    };
    cells(cx, cy)
        .into_iter()
        .any(|(x, y)| grid.get(x, y).unwrap_or(true))
}

#[inline]
fn fraction(v: f64) -> f64 {
    let f = v - v.floor();
    // v - floor(v) can round up to exactly 1.0 for tiny negative inputs.
    if f < 1.0 { f } else { 0.0 }
}

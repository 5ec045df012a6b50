use rayon::prelude::*;

use crate::error::CastError;
use crate::grid::GridMap;
use crate::player::PlayerState;
use crate::stepper::Ray;
use crate::wall::Orientation;

/// Corrected distances are clamped to this before projecting.
pub const MIN_DISTANCE: f64 = 1e-6;

/// One screen column of wall to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub column: usize,
    pub top: f64,
    pub bottom: f64,
    pub texture_offset: f64,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub screen_width: usize,
    pub screen_height: usize,
    /// Distance from the eye to the view plane spanning `[-1, 1)`; larger
    /// values narrow the field of view.
    pub focal_length: f64,
}

impl Camera {
    pub fn new(screen_width: usize, screen_height: usize, focal_length: f64) -> Self {
        Self {
            screen_width,
            screen_height,
            focal_length,
        }
    }

    /// Horizontal view-plane coordinate of `column`, in `[-1, 1)`.
    #[inline]
    pub fn pan(&self, column: usize) -> f64 {
        2.0 * column as f64 / self.screen_width as f64 - 1.0
    }

    /// Angle between the centre ray and the ray through `column`.
    #[inline]
    pub fn column_offset(&self, column: usize) -> f64 {
        self.pan(column).atan2(self.focal_length)
    }

    /// Full horizontal field of view in radians.
    pub fn fov(&self) -> f64 {
        2.0 * 1f64.atan2(self.focal_length)
    }

    pub fn project_column(
        &self,
        grid: &GridMap,
        player: &PlayerState,
        column: usize,
    ) -> Result<DrawCommand, CastError> {
        let sigma = self.column_offset(column);
        let hit = Ray::new(player.position, player.heading + sigma).cast(grid)?;

        let raw = (hit.point - player.position).magnitude();
        // Fisheye: project the radial length onto the view direction.
        let corrected = self.clamp_distance(raw * sigma.cos(), column);
        let (top, bottom) = self.wall_extent(corrected);

        Ok(DrawCommand {
            column,
            top,
            bottom,
            texture_offset: hit.texture_offset,
            orientation: hit.orientation,
        })
    }

    /// Casts every column of the frame. Columns are independent and share
    /// only the read-only grid and the player snapshot, so they run in
    /// parallel; the result is in column order.
    pub fn compute_frame(
        &self,
        grid: &GridMap,
        player: &PlayerState,
    ) -> Result<Vec<DrawCommand>, CastError> {
        (0..self.screen_width)
            .into_par_iter()
            .map(|column| self.project_column(grid, player, column))
            .collect()
    }

    /// Top and bottom screen rows of a wall at view-plane distance `distance`.
    #[inline]
    pub fn wall_extent(&self, distance: f64) -> (f64, f64) {
        let screen_height = self.screen_height as f64;
        let height = screen_height / distance;
        let center = 0.5 * screen_height;
        (center - 0.5 * height, center + 0.5 * height)
    }

    fn clamp_distance(&self, distance: f64, column: usize) -> f64 {
        if distance >= MIN_DISTANCE {
            return distance;
        }
        log::warn!("column {column}: corrected distance {distance} clamped to {MIN_DISTANCE}");
        MIN_DISTANCE
    }
}

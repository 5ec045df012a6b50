use std::f64::consts::{PI, TAU};

use serde::Deserialize;

use crate::geometry::Point;
use crate::grid::GridMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Point,
    /// Radians; `0` faces `+x`, `π/2` faces `+y` (south).
    pub heading: f64,
}

impl PlayerState {
    pub fn new(position: Point, heading: f64) -> Self {
        Self { position, heading }
    }
}

/// Movement requested for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Intents {
    pub turn_left: bool,
    pub turn_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl Intents {
    pub fn is_idle(&self) -> bool {
        *self == Intents::default()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Reject the whole frame's movement if the combined target is solid.
    #[default]
    WholeMove,
    /// Fall back to the x-only, then y-only component, sliding along walls.
    PerAxis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controller {
    pub turn_step: f64,
    pub dx: f64,
    pub dy: f64,
    pub collision: CollisionPolicy,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            turn_step: 0.025,
            dx: 0.025,
            dy: 0.025,
            collision: CollisionPolicy::WholeMove,
        }
    }
}

impl Controller {
    /// Applies one frame of intents. Rotation always happens and uses the
    /// new heading for this frame's translation.
    pub fn apply(&self, state: &mut PlayerState, intents: Intents, grid: &GridMap) {
        if intents.is_idle() {
            return;
        }
        if intents.turn_left {
            state.heading -= self.turn_step;
        }
        if intents.turn_right {
            state.heading += self.turn_step;
        }
        state.heading = wrap_angle(state.heading);

        let delta = self.translation(state.heading, intents);
        if delta == Point::default() {
            return;
        }

        let from = state.position;
        let candidates: &[Point] = match self.collision {
            CollisionPolicy::WholeMove => &[from + delta],
            CollisionPolicy::PerAxis => &[
                from + delta,
                Point::new(from.x + delta.x, from.y),
                Point::new(from.x, from.y + delta.y),
            ],
        };

        match candidates.iter().find(|p| !grid.is_solid_at(**p)) {
            Some(&to) => state.position = to,
            None => log::debug!(
                "movement from ({:.3}, {:.3}) blocked by wall at ({:.3}, {:.3})",
                from.x,
                from.y,
                from.x + delta.x,
                from.y + delta.y
            ),
        }
    }

    fn translation(&self, heading: f64, intents: Intents) -> Point {
        let (sin, cos) = heading.sin_cos();
        let mut d = Point::default();
        if intents.move_forward {
            d = d + Point::new(self.dx * cos, self.dy * sin);
        }
        if intents.move_backward {
            d = d - Point::new(self.dx * cos, self.dy * sin);
        }
        if intents.strafe_left {
            d = d + Point::new(self.dy * sin, -self.dx * cos);
        }
        if intents.strafe_right {
            d = d + Point::new(-self.dy * sin, self.dx * cos);
        }
        d
    }
}

/// Wraps an angle into `(-π, π]`.
fn wrap_angle(radians: f64) -> f64 {
    if radians > -PI && radians <= PI {
        return radians;
    }
    let wrapped = radians.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn forward() -> Intents {
        Intents {
            move_forward: true,
            ..Intents::default()
        }
    }

    #[test]
    fn forward_into_wall_is_rejected() {
        let grid = GridMap::demo();
        let mut state = PlayerState::new(Point::new(3.99, 2.5), 0.0);
        Controller::default().apply(&mut state, forward(), &grid);
        assert_eq!(state.position, Point::new(3.99, 2.5));
    }

    #[test]
    fn forward_in_open_room_is_accepted() {
        let grid = GridMap::demo();
        let mut state = PlayerState::new(Point::new(2.5, 2.5), 0.0);
        Controller::default().apply(&mut state, forward(), &grid);
        assert_relative_eq!(state.position.x, 2.525);
        assert_relative_eq!(state.position.y, 2.5);
    }

    #[test]
    fn rotation_is_applied_even_when_blocked() {
        let grid = GridMap::demo();
        let mut state = PlayerState::new(Point::new(3.99, 2.5), 0.0);
        let intents = Intents {
            turn_right: true,
            ..forward()
        };
        Controller::default().apply(&mut state, intents, &grid);
        assert_relative_eq!(state.heading, 0.025);
        // Still heading almost due east into the wall.
        assert_eq!(state.position, Point::new(3.99, 2.5));
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let grid = GridMap::demo();
        let controller = Controller::default();
        let mut state = PlayerState::new(Point::new(2.5, 2.5), 0.0);
        let left = Intents {
            strafe_left: true,
            ..Intents::default()
        };
        controller.apply(&mut state, left, &grid);
        assert_relative_eq!(state.position.x, 2.5);
        assert_relative_eq!(state.position.y, 2.475);

        let right = Intents {
            strafe_right: true,
            ..Intents::default()
        };
        controller.apply(&mut state, right, &grid);
        assert_relative_eq!(state.position.y, 2.5);
    }

    #[test]
    fn opposing_intents_cancel() {
        let grid = GridMap::demo();
        let mut state = PlayerState::new(Point::new(2.5, 2.5), 0.3);
        let intents = Intents {
            move_forward: true,
            move_backward: true,
            turn_left: true,
            turn_right: true,
            ..Intents::default()
        };
        Controller::default().apply(&mut state, intents, &grid);
        assert_relative_eq!(state.position.x, 2.5);
        assert_relative_eq!(state.position.y, 2.5);
        assert_relative_eq!(state.heading, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn per_axis_policy_slides_along_wall() {
        let grid = GridMap::demo();
        let controller = Controller {
            collision: CollisionPolicy::PerAxis,
            dx: 0.1,
            dy: 0.1,
            ..Controller::default()
        };
        // Heading south-east against the east wall of the first room.
        let heading = std::f64::consts::FRAC_PI_4;
        let mut state = PlayerState::new(Point::new(3.95, 2.5), heading);
        controller.apply(&mut state, forward(), &grid);
        assert_relative_eq!(state.position.x, 3.95);
        assert!(state.position.y > 2.5);

        let mut whole = PlayerState::new(Point::new(3.95, 2.5), heading);
        Controller {
            collision: CollisionPolicy::WholeMove,
            ..controller
        }
        .apply(&mut whole, forward(), &grid);
        assert_eq!(whole.position, Point::new(3.95, 2.5));
    }

    #[test]
    fn heading_wraps_into_half_open_range() {
        assert_eq!(wrap_angle(1.0), 1.0);
        assert_eq!(wrap_angle(PI), PI);
        assert_relative_eq!(wrap_angle(PI + 0.5), -PI + 0.5, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(-PI - 0.5), PI - 0.5, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(5.0 * TAU + 0.25), 0.25, epsilon = 1e-9);
    }
}

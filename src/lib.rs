pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod player;
pub mod quadrant;
pub mod renderer;
pub mod scaler;
pub mod stepper;
pub mod wall;

pub use camera::{Camera, DrawCommand};
pub use config::Config;
pub use error::{CastError, ConfigError, GridError};
pub use geometry::Point;
pub use grid::GridMap;
pub use player::{CollisionPolicy, Controller, Intents, PlayerState};
pub use quadrant::{Direction, Quadrant};
pub use stepper::{Ray, Slope};
pub use wall::{Orientation, WallHit};

//! Startup configuration, loaded from YAML.
//!
//! ```yaml
//! screen: { width: 800, height: 600 }
//! focal_length: 2.5
//! turn_step: 0.025
//! move_step: { dx: 0.025, dy: 0.025 }
//! collision: whole_move
//! spawn: { x: 2.5, y: 2.5, heading: 0.0 }
//! frame_interval_ms: 10
//! map:
//!   - "11111"
//!   - "10001"
//!   - "11111"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::geometry::Point;
use crate::grid::{DEMO_MAP, GridMap};
use crate::player::{CollisionPolicy, Controller, PlayerState};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub screen: ScreenConfig,
    pub focal_length: f64,
    pub turn_step: f64,
    pub move_step: MoveStep,
    pub collision: CollisionPolicy,
    pub spawn: Spawn,
    pub frame_interval_ms: u64,
    pub map: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveStep {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            focal_length: 2.5,
            turn_step: 0.025,
            move_step: MoveStep::default(),
            collision: CollisionPolicy::WholeMove,
            spawn: Spawn::default(),
            frame_interval_ms: 10,
            map: DEMO_MAP.iter().map(|row| row.to_string()).collect(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for MoveStep {
    fn default() -> Self {
        Self {
            dx: 0.025,
            dy: 0.025,
        }
    }
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            x: 2.5,
            y: 2.5,
            heading: 0.0,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks numeric settings, the map and the spawn point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width == 0 {
            return Err(invalid("screen.width", "must be positive"));
        }
        if self.screen.height == 0 {
            return Err(invalid("screen.height", "must be positive"));
        }
        positive("focal_length", self.focal_length)?;
        positive("turn_step", self.turn_step)?;
        positive("move_step.dx", self.move_step.dx)?;
        positive("move_step.dy", self.move_step.dy)?;
        if !self.spawn.heading.is_finite() {
            return Err(invalid("spawn.heading", "must be finite"));
        }

        let grid = self.grid()?;
        let spawn = Point::new(self.spawn.x, self.spawn.y);
        if grid.is_solid_at(spawn) {
            return Err(invalid(
                "spawn",
                format!("({}, {}) is not an open cell", spawn.x, spawn.y),
            ));
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<GridMap, ConfigError> {
        let grid = GridMap::from_rows(self.map.as_slice())?;
        log::debug!("loaded {}x{} map", grid.width(), grid.height());
        Ok(grid)
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.screen.width, self.screen.height, self.focal_length)
    }

    pub fn controller(&self) -> Controller {
        Controller {
            turn_step: self.turn_step,
            dx: self.move_step.dx,
            dy: self.move_step.dy,
            collision: self.collision,
        }
    }

    pub fn spawn(&self) -> PlayerState {
        PlayerState::new(Point::new(self.spawn.x, self.spawn.y), self.spawn.heading)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be positive and finite, got {value}")))
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.grid().unwrap(), GridMap::demo());
        assert_eq!(config.controller(), Controller::default());
        assert_eq!(config.camera(), Camera::new(800, 600, 2.5));
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = Config::from_yaml(
            "screen: { width: 320 }\ncollision: per_axis\nspawn: { x: 6.5, y: 9.5 }\n",
        )
        .unwrap();
        assert_eq!(config.screen.width, 320);
        assert_eq!(config.screen.height, 600);
        assert_eq!(config.collision, CollisionPolicy::PerAxis);
        assert_eq!(config.spawn().position, Point::new(6.5, 9.5));
        assert_eq!(config.spawn().heading, 0.0);
    }

    #[test]
    fn custom_map_is_parsed() {
        let yaml = "map: ['#####', '#...#', '#####']\nspawn: { x: 2.5, y: 1.5 }\n";
        let config = Config::from_yaml(yaml).unwrap();
        let grid = config.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 3));
    }

    #[test]
    fn open_map_is_rejected() {
        let yaml = "map: ['#####', '#....', '#####']\nspawn: { x: 2.5, y: 1.5 }\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Grid(GridError::OpenBoundary { x: 4, y: 1 })
        ));
    }

    #[test]
    fn spawn_in_wall_is_rejected() {
        let err = Config::from_yaml("spawn: { x: 4.5, y: 2.5 }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "spawn", .. }));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        for yaml in [
            "focal_length: 0.0",
            "turn_step: -1.0",
            "move_step: { dx: .nan }",
            "screen: { height: 0 }",
        ] {
            let err = Config::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{yaml}: {err}");
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_yaml("fov: 90").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/gridcast.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

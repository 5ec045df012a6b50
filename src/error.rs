use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    TooSmall { width: usize, height: usize },
    #[error("cell data length {len} does not match grid size {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown cell symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
    #[error("boundary is open at cell ({x}, {y})")]
    OpenBoundary { x: usize, y: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    #[error("ray from ({:.3}, {:.3}) found no wall within {limit} steps", .origin.x, .origin.y)]
    StepLimit { origin: Point, limit: usize },
    #[error("no admissible grid line from ({:.3}, {:.3})", .at.x, .at.y)]
    NoCandidate { at: Point },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid map: {0}")]
    Grid(#[from] GridError),
    #[error("invalid setting `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

//! Error types for bhavan-nav

use bhavan_grid::pathfinding::PathFailure;
use bhavan_grid::{BuildError, ConfigLoadError, GridRecordError, MeshRecordError};
use thiserror::Error;

/// bhavan-nav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Grid record error: {0}")]
    GridRecord(#[from] GridRecordError),

    #[error("Mesh record error: {0}")]
    MeshRecord(#[from] MeshRecordError),

    #[error("Grid build failed: {0}")]
    Build(#[from] BuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Planning failed: {0}")]
    Planning(PathFailure),
}

pub type Result<T> = std::result::Result<T, NavError>;

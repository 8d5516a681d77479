use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to load a resource through the cache.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid resource id '{0}'")]
    InvalidId(String),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Fatal host-side failures. None of these can happen once the loop runs.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("logger init failed: {0}")]
    Logger(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

use std::path::PathBuf;

/// Errors that can occur while rendering a sweep.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("sweep result has no {0} to draw")]
    EmptyResult(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("invalid output path: {0:?}")]
    InvalidPath(PathBuf),
}

pub type RenderResult<T> = Result<T, RenderError>;

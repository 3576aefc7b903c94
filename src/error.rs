use thiserror::Error;

/// Errors returned by the point indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KdTreeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type KdTreeResult<T> = Result<T, KdTreeError>;

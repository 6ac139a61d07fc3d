//! Failure kinds raised by dataset construction and sample access.

use std::path::PathBuf;
use thiserror::Error;

/// The typed failures of this crate.
///
/// They travel inside [anyhow::Error] and can be recovered with
/// `error.downcast_ref::<DatasetError>()`. Failures from image decoding,
/// transforms and archive fetching are passed through as they are.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("'{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("index {index} is out of range for dataset of {len} records")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DatasetError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

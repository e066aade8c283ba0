//! Error types for fairypack operations.

use thiserror::Error;

/// Errors that can occur while converting or writing a UI package.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid design tree: {0}")]
    InvalidDesign(String),

    #[error("Invalid build id: {0}")]
    InvalidBuildId(String),
}

pub type Result<T> = std::result::Result<T, Error>;

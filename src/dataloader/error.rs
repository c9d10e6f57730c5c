use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoaderError {
    // IO errors
    #[error("Can't open file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Format errors
    #[error("Header of {} is truncated: expected {expected} bytes, found {found}", path.display())]
    TruncatedHeader {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Payload of {} is truncated: expected {expected} bytes, found {found}", path.display())]
    TruncatedPayload {
        path: PathBuf,
        expected: u64,
        found: usize,
    },

    #[error("Sample count mismatch: {images} images vs {labels} labels")]
    CountMismatch { images: usize, labels: usize },

    #[error("Invalid magic number in {}: expected {expected}, got {got}", path.display())]
    InvalidMagic {
        path: PathBuf,
        expected: u32,
        got: u32,
    },

    // Accessor errors
    #[error("Index {index} out of range (bound {bound})")]
    OutOfRange { index: usize, bound: usize },

    // Config errors
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Format,
    OutOfRange,
    Config,
    Image,
}

impl DataLoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataLoaderError::FileAccess { .. } => ErrorKind::FileAccess,
            DataLoaderError::TruncatedHeader { .. }
            | DataLoaderError::TruncatedPayload { .. }
            | DataLoaderError::CountMismatch { .. }
            | DataLoaderError::InvalidMagic { .. } => ErrorKind::Format,
            DataLoaderError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DataLoaderError::InvalidBatchSize(_) => ErrorKind::Config,
            DataLoaderError::ImageError(_) => ErrorKind::Image,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataLoaderError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

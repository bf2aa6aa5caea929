// Errors raised by canvas file I/O and snapshot restore.

use std::path::PathBuf;
use thiserror::Error;

/// Every variant is recoverable: the failing call leaves the canvas untouched.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "image {} is {}x{}, canvas is {}x{}",
        path.display(),
        found.0,
        found.1,
        expected.0,
        expected.1
    )]
    DimensionMismatch {
        path: PathBuf,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error(
        "snapshot is {}x{}, canvas is {}x{}",
        found.0,
        found.1,
        expected.0,
        expected.1
    )]
    SnapshotMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl CanvasError {
    /// True for errors raised while opening a file.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            CanvasError::Decode { .. } | CanvasError::DimensionMismatch { .. }
        )
    }

    /// The file involved, for errors raised by file I/O.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CanvasError::Decode { path, .. }
            | CanvasError::DimensionMismatch { path, .. }
            | CanvasError::Encode { path, .. } => Some(path),
            CanvasError::SnapshotMismatch { .. } => None,
        }
    }
}

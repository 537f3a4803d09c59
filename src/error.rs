use std::{num::TryFromIntError, path::PathBuf, str::Utf8Error};
use thiserror::Error;

pub type PolyxResult<T> = std::result::Result<T, PolyxError>;

#[derive(Debug, Error)]
pub enum PolyxError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Htslib(#[from] rust_htslib::errors::Error),
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    TryFromInt(#[from] TryFromIntError),
    #[error("Empty tag: the INFO/FILTER tag must contain at least one non-blank character")]
    EmptyTag,
    #[error(
        "Reference index file not found: {}. Create it using 'samtools faidx {}'",
        fai_path.display(),
        reference_path.display()
    )]
    MissingReferenceIndex {
        fai_path: PathBuf,
        reference_path: PathBuf,
    },
    #[error("Failed to open reference {}: {message}", reference_path.display())]
    ReferenceOpen {
        reference_path: PathBuf,
        message: String,
    },
    #[error("Contig '{contig}' is not present in the reference {}", reference_path.display())]
    ContigNotFound {
        contig: String,
        reference_path: PathBuf,
    },
    #[error("Position {index} is outside of contig '{contig}' (length {length})")]
    PositionOutOfRange {
        contig: String,
        index: i64,
        length: usize,
    },
    #[error("Invalid variant span {contig}:{start}-{end}")]
    InvalidVariantSpan { contig: String, start: i64, end: i64 },
    #[error("Reference has already been closed")]
    ReferenceClosed,
}

impl PolyxError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Errors caused by the run configuration rather than by the data being processed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyTag
                | Self::MissingReferenceIndex { .. }
                | Self::ReferenceOpen { .. }
                | Self::ContigNotFound { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_configuration_error() {
            2
        } else {
            1
        }
    }
}

#[macro_export]
macro_rules! polyx_error {
    ($($arg:tt)*) => {
        $crate::error::PolyxError::message(format!($($arg)*))
    };
}

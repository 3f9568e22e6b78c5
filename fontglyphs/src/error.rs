use std::{fmt::Display, path::PathBuf};

use crate::{charmap::Encoding, walk::WalkError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not initialize font engine: {0}")]
    EngineInit(String),
    #[error("could not open face {index} of '{path}': {reason} ({detail})")]
    FaceOpen {
        path: PathBuf,
        index: u32,
        reason: FaceOpenReason,
        detail: String,
    },
    #[error("'{path}' has no Unicode charmap (found {encodings:?})")]
    NoCharmap {
        path: PathBuf,
        encodings: Vec<Encoding>,
    },
    #[error("malformed charmap in '{path}': {source}")]
    MalformedCharmap {
        path: PathBuf,
        #[source]
        source: WalkError,
    },
    #[error("enumeration cancelled")]
    Cancelled,
}

/// Why a face could not be opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceOpenReason {
    NotFound,
    Unreadable,
    Corrupt,
    UnsupportedFormat,
    IndexOutOfRange,
}

impl Display for FaceOpenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            FaceOpenReason::NotFound => "file not found",
            FaceOpenReason::Unreadable => "file could not be read",
            FaceOpenReason::Corrupt => "corrupt font data",
            FaceOpenReason::UnsupportedFormat => "unsupported font format",
            FaceOpenReason::IndexOutOfRange => "face index out of range",
        };
        f.write_str(message)
    }
}

impl Error {
    /// Whether this error still lets other files in the batch be processed.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Error::EngineInit(_))
    }
}

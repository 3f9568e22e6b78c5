use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("'{0}' exists but is not a directory")]
    ExpectedDirectory(PathBuf),
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to stdout: '{0}'")]
    StdioWriteFail(#[source] io::Error),
    #[error("unable to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("bad path filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("unknown access level '{0}', expected one of public, private, internal, protected")]
    InvalidAccessLevel(String),
    #[error("'{0}' is not a valid namespace")]
    InvalidNamespace(String),
    #[error(transparent)]
    Enumeration(#[from] fontglyphs::Error),
    #[error("{0} file(s) failed, see the log for details")]
    FilesFailed(usize),
}

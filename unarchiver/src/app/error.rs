/*!
Errors that can happen during the application's runtime
*/

use std::{
    fmt::{Display, Formatter, Result},
    io::Error as IoError,
    path::PathBuf,
};

use keyed_archive::error::archive::ArchiveError;

/// Errors that can happen during the application's runtime
#[derive(Debug)]
pub enum RuntimeError {
    InvalidOptions(String),
    ArchiveError(ArchiveError),
    DiskError(IoError, PathBuf),
}

impl Display for RuntimeError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            RuntimeError::InvalidOptions(why) => write!(fmt, "Invalid options!\n{why}"),
            RuntimeError::ArchiveError(why) => write!(fmt, "{why}"),
            RuntimeError::DiskError(why, path) => write!(fmt, "{why}: {path:?}"),
        }
    }
}

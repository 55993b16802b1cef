//! Error types for the HTML folder conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a folder of HTML pages.
///
/// Only `FolderNotFound` and the I/O variants abort a run. The others are
/// recovered close to where they occur: a file without its content anchor
/// contributes nothing, an unresolved image is omitted.
#[derive(Error, Debug)]
pub enum Error {
    #[error("folder does not exist: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("content anchor '{anchor}' not found in {file}")]
    AnchorMissing { file: String, anchor: String },

    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;

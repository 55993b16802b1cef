//! Run configuration for a folder conversion.

use std::path::PathBuf;

use crate::assemble::DEFAULT_FIRST_PAGE;
use crate::error::{Error, Result};
use crate::images::DirImageResolver;
use crate::transcribe::{Transcriber, DEFAULT_ANCHOR_ID};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Folder holding the `.html` pages.
    pub html_dir: PathBuf,
    /// Flat folder every `<img src>` is resolved against by basename.
    pub image_dir: PathBuf,
    /// Output `.docx` path.
    pub out: PathBuf,
    /// Page placed first, without title or page break.
    pub first_page: String,
    /// `id` of the element whose content is transcribed.
    pub anchor_id: String,
}

impl Config {
    pub fn new(html_dir: impl Into<PathBuf>, image_dir: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            html_dir: html_dir.into(),
            image_dir: image_dir.into(),
            out: out.into(),
            first_page: DEFAULT_FIRST_PAGE.to_string(),
            anchor_id: DEFAULT_ANCHOR_ID.to_string(),
        }
    }

    /// Both input folders must exist before any page is read.
    pub fn validate(&self) -> Result<()> {
        for dir in [&self.html_dir, &self.image_dir] {
            if !dir.is_dir() {
                return Err(Error::FolderNotFound(dir.clone()));
            }
        }
        Ok(())
    }

    pub fn transcriber(&self) -> Transcriber {
        Transcriber::new(self.anchor_id.clone())
    }

    pub fn image_resolver(&self) -> DirImageResolver {
        DirImageResolver::new(&self.image_dir)
    }
}

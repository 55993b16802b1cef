//! Sequencing many pages into one output document.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::images::ImageResolver;
use crate::model::{Operation, OutputDocument};
use crate::transcribe::{SourceDocument, Transcriber};

/// Name of the page transcribed first, without a title or page break.
pub const DEFAULT_FIRST_PAGE: &str = "frmPAVIS.html";

/// Title heading for a page: its file name minus the `.html` suffix.
pub fn page_title(file_name: &str) -> &str {
    file_name.strip_suffix(".html").unwrap_or(file_name)
}

/// Appends one page to `out` and hands the accumulator back.
///
/// Titled pages are preceded by a page break and a level-1 heading. A page
/// without its content anchor keeps those and contributes nothing else.
fn append_page(
    mut out: OutputDocument,
    source: &SourceDocument,
    titled: bool,
    transcriber: &Transcriber,
    images: &dyn ImageResolver,
) -> Result<OutputDocument> {
    if titled {
        out.push(Operation::PageBreak);
        out.push(Operation::heading(page_title(source.name()), 1, None));
    }
    match transcriber.transcribe(source, images) {
        Ok(ops) => out.extend(ops),
        Err(e @ Error::AnchorMissing { .. }) => warn!("{e}"),
        Err(e) => return Err(e),
    }
    Ok(out)
}

/// Assembles already parsed pages. `others` are taken in file name order.
pub fn assemble(
    first: Option<&SourceDocument>,
    others: &[SourceDocument],
    transcriber: &Transcriber,
    images: &dyn ImageResolver,
) -> Result<OutputDocument> {
    let mut out = OutputDocument::new();
    match first {
        Some(doc) => out = append_page(out, doc, false, transcriber, images)?,
        None => warn!("first page not provided"),
    }

    let mut ordered: Vec<&SourceDocument> = others.iter().collect();
    ordered.sort_by(|a, b| a.name().cmp(b.name()));
    for doc in ordered {
        out = append_page(out, doc, true, transcriber, images)?;
    }
    Ok(out)
}

/// `.html` files of `dir` other than `first_page`, sorted by name.
pub fn list_pages(dir: &Path, first_page: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FolderNotFound(dir.to_path_buf()));
    }
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".html") && name != first_page && entry.path().is_file() {
            pages.push(entry.path());
        }
    }
    pages.sort();
    Ok(pages)
}

/// Assembles every page of `dir`, parsing one file at a time.
pub fn assemble_folder(
    dir: &Path,
    first_page: &str,
    transcriber: &Transcriber,
    images: &dyn ImageResolver,
) -> Result<OutputDocument> {
    let pages = list_pages(dir, first_page)?;
    let mut out = OutputDocument::new();

    let first_path = dir.join(first_page);
    if first_path.is_file() {
        info!("Adding {first_page} as the first page...");
        let source = SourceDocument::from_path(&first_path)?;
        out = append_page(out, &source, false, transcriber, images)?;
    } else {
        warn!("first page ({first_page}) not found in {}", dir.display());
    }

    for path in pages {
        let source = SourceDocument::from_path(&path)?;
        info!("Processing: {}", source.name());
        out = append_page(out, &source, true, transcriber, images)?;
    }
    Ok(out)
}

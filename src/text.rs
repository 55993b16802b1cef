//! Plain-text extraction: one `.txt` beside each `.html`.

use std::path::{Path, PathBuf};

use log::{debug, info};
use markup5ever_rcdom::{Handle, NodeData};

use crate::dom::{collapse_ws, html5_parse, tag_lower};
use crate::error::{Error, Result};

/// Subtrees that never contribute visible text.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "meta", "noscript", "header", "footer", "nav", "aside",
];

const PREVIEW_CHARS: usize = 500;

/// Visible text of a page, whitespace-normalized.
pub fn extract_text(html: &str) -> String {
    fn walk(node: &Handle, out: &mut Vec<String>) {
        match &node.data {
            NodeData::Text { contents } => out.push(contents.borrow().to_string()),
            NodeData::Element { .. } => {
                if let Some(tag) = tag_lower(node) {
                    if SKIPPED_TAGS.contains(&tag.as_str()) {
                        return;
                    }
                }
            }
            _ => {}
        }
        for c in node.children.borrow().iter() {
            walk(c, out);
        }
    }

    let dom = html5_parse(html);
    let mut pieces = Vec::new();
    walk(&dom.document, &mut pieces);
    collapse_ws(&pieces.join(" "))
        .trim()
        .replace('\u{feff}', "")
}

/// Writes `<name>.txt` for every `<name>.html` in `dir`, returning the
/// written paths in name order.
pub fn extract_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FolderNotFound(dir.to_path_buf()));
    }

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_html = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(".html"));
        if is_html && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();

    let mut written = Vec::with_capacity(inputs.len());
    for path in inputs {
        info!("Processing: {}", path.display());
        let bytes = std::fs::read(&path)?;
        let text = extract_text(&String::from_utf8_lossy(&bytes));
        debug!("{}", text.chars().take(PREVIEW_CHARS).collect::<String>());

        let out = path.with_extension("txt");
        std::fs::write(&out, &text)?;
        info!("Saved extracted text to: {}", out.display());
        written.push(out);
    }
    Ok(written)
}

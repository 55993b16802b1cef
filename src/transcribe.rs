//! HTML content subtree → ordered document operations.
//!
//! Every element under the content anchor is visited once, in document
//! order, and dispatched on its [`NodeKind`]. Descendants of a handled
//! element are still visited on their own, so a `<b>` inside an `<h2>`
//! yields a heading followed by a bold paragraph. List items are the
//! exception: they are only materialized by their enclosing list, which
//! looks at its direct `<li>` children.

use std::path::Path;

use log::debug;
use markup5ever_rcdom::{Handle, RcDom};

use crate::dom::{
    attr_get, children_named, descendant_elements, find_by_id, find_descendant,
    has_element_descendant, html5_parse, tag_lower, text_content,
};
use crate::error::{Error, Result};
use crate::images::{basename, ImageResolver};
use crate::model::{Emphasis, ListStyle, NodeKind, Operation, IMAGE_WIDTH_EMU};
use crate::style::{resolve_color, Rgb};

/// `id` of the element whose subtree is transcribed.
pub const DEFAULT_ANCHOR_ID: &str = "mainbody";

/// One parsed input page.
pub struct SourceDocument {
    name: String,
    dom: RcDom,
}

impl SourceDocument {
    pub fn parse(name: impl Into<String>, html: &str) -> Self {
        Self {
            name: name.into(),
            dom: html5_parse(html),
        }
    }

    /// Reads and parses a file. Invalid UTF-8 is replaced, not rejected.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let html = String::from_utf8_lossy(&bytes);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::parse(name, &html))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor(&self, id: &str) -> Option<Handle> {
        find_by_id(&self.dom.document, id)
    }
}

/// Converts the anchored subtree of a [`SourceDocument`] into operations.
#[derive(Debug, Clone)]
pub struct Transcriber {
    anchor_id: String,
    image_width_emu: u64,
}

impl Default for Transcriber {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_ID)
    }
}

impl Transcriber {
    pub fn new(anchor_id: impl Into<String>) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            image_width_emu: IMAGE_WIDTH_EMU,
        }
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    /// Fails with `Error::AnchorMissing` when the document has no element
    /// carrying the anchor id. Unresolvable images are dropped silently.
    pub fn transcribe(
        &self,
        doc: &SourceDocument,
        images: &dyn ImageResolver,
    ) -> Result<Vec<Operation>> {
        let anchor = doc.anchor(&self.anchor_id).ok_or_else(|| Error::AnchorMissing {
            file: doc.name().to_string(),
            anchor: self.anchor_id.clone(),
        })?;

        let mut ops = Vec::new();
        for node in descendant_elements(&anchor) {
            let Some(tag) = tag_lower(&node) else { continue };
            match self.transcribe_node(&node, NodeKind::from_tag(&tag), images) {
                Ok(node_ops) => ops.extend(node_ops),
                Err(Error::ImageNotFound(path)) => {
                    debug!("{}: image {} not found, skipped", doc.name(), path.display());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(ops)
    }

    fn transcribe_node(
        &self,
        node: &Handle,
        kind: NodeKind,
        images: &dyn ImageResolver,
    ) -> Result<Vec<Operation>> {
        let color = resolve_color(attr_get(node, "style").as_deref());

        let ops = match kind {
            NodeKind::Heading(level) => vec![Operation::heading(text_content(node), level, color)],
            NodeKind::Bold => vec![Operation::paragraph(text_content(node), Emphasis::BOLD, color)],
            NodeKind::Italic => {
                vec![Operation::paragraph(text_content(node), Emphasis::ITALIC, color)]
            }
            // Wrapping paragraphs are skipped; their tagged children emit on their own.
            NodeKind::Paragraph if has_element_descendant(node) => Vec::new(),
            NodeKind::Paragraph | NodeKind::ColoredSpan => {
                vec![Operation::paragraph(text_content(node), Emphasis::NONE, color)]
            }
            NodeKind::UnorderedList => list_items(node, ListStyle::Bullet, color),
            NodeKind::OrderedList => list_items(node, ListStyle::Number, color),
            // Items belong to their list; bare links are not materialized.
            NodeKind::ListItem | NodeKind::Link | NodeKind::Ignored => Vec::new(),
            NodeKind::Image => self.image(node, images)?,
        };
        Ok(ops)
    }

    fn image(&self, node: &Handle, images: &dyn ImageResolver) -> Result<Vec<Operation>> {
        let Some(src) = attr_get(node, "src").filter(|s| !s.is_empty()) else {
            return Ok(Vec::new());
        };
        let image = images.resolve(&src)?;
        let caption = format!("Image: {}", basename(&src));
        Ok(vec![
            Operation::AddImage {
                name: image.name,
                bytes: image.bytes,
                width_emu: self.image_width_emu,
            },
            Operation::paragraph(caption, Emphasis::NONE, None),
        ])
    }
}

/// Entries for the direct `<li>` children of a list.
///
/// An item made of nothing but a link keeps the link clickable. An item
/// with text around its link is flattened to plain text.
fn list_items(list: &Handle, style: ListStyle, color: Option<Rgb>) -> Vec<Operation> {
    let mut ops = Vec::new();
    for li in children_named(list, "li") {
        let item_text = text_content(&li);
        let Some(link) = find_descendant(&li, "a") else {
            ops.push(Operation::list_item(item_text, style, color));
            continue;
        };

        let link_text = text_content(&link);
        if item_text.trim() != link_text.trim() {
            ops.push(Operation::list_item(item_text, style, color));
            continue;
        }

        let href = attr_get(&link, "href").unwrap_or_default();
        if !link_text.is_empty() && !href.is_empty() {
            ops.push(Operation::list_item("", style, color));
            ops.push(Operation::hyperlink(link_text, href, color));
        }
    }
    ops
}

/// Transcribes with the default anchor id.
pub fn transcribe(doc: &SourceDocument, images: &dyn ImageResolver) -> Result<Vec<Operation>> {
    Transcriber::default().transcribe(doc, images)
}

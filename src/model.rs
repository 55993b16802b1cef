//! The document model shared by the transcriber, the assembler and the writer.

use crate::style::Rgb;

/// Fixed width of every embedded picture: three inches, in EMU.
pub const IMAGE_WIDTH_EMU: u64 = 3 * 914_400;

/// Element kinds the transcriber reacts to. Everything else is `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Heading(u8),
    Bold,
    Italic,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    ColoredSpan,
    Image,
    Ignored,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => NodeKind::Heading(1),
            "h2" => NodeKind::Heading(2),
            "h3" => NodeKind::Heading(3),
            "h4" => NodeKind::Heading(4),
            "h5" => NodeKind::Heading(5),
            "h6" => NodeKind::Heading(6),
            "b" | "strong" => NodeKind::Bold,
            "i" | "em" => NodeKind::Italic,
            "p" => NodeKind::Paragraph,
            "ul" => NodeKind::UnorderedList,
            "ol" => NodeKind::OrderedList,
            "li" => NodeKind::ListItem,
            "a" => NodeKind::Link,
            "span" => NodeKind::ColoredSpan,
            "img" => NodeKind::Image,
            _ => NodeKind::Ignored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Number,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis { bold: false, italic: false };
    pub const BOLD: Emphasis = Emphasis { bold: true, italic: false };
    pub const ITALIC: Emphasis = Emphasis { bold: false, italic: true };
}

/// One instruction for the output document builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddHeading {
        text: String,
        level: u8,
        color: Option<Rgb>,
    },
    AddParagraph {
        text: String,
        emphasis: Emphasis,
        color: Option<Rgb>,
    },
    AddListItem {
        text: String,
        style: ListStyle,
        color: Option<Rgb>,
    },
    /// Clickable run attached to the list entry opened just before it.
    AddHyperlinkRun {
        text: String,
        href: String,
        color: Option<Rgb>,
    },
    AddImage {
        name: String,
        bytes: Vec<u8>,
        width_emu: u64,
    },
    PageBreak,
}

impl Operation {
    pub fn heading(text: impl Into<String>, level: u8, color: Option<Rgb>) -> Self {
        Operation::AddHeading { text: text.into(), level, color }
    }

    pub fn paragraph(text: impl Into<String>, emphasis: Emphasis, color: Option<Rgb>) -> Self {
        Operation::AddParagraph { text: text.into(), emphasis, color }
    }

    pub fn list_item(text: impl Into<String>, style: ListStyle, color: Option<Rgb>) -> Self {
        Operation::AddListItem { text: text.into(), style, color }
    }

    pub fn hyperlink(text: impl Into<String>, href: impl Into<String>, color: Option<Rgb>) -> Self {
        Operation::AddHyperlinkRun { text: text.into(), href: href.into(), color }
    }
}

/// Append-only accumulator for the whole output document.
///
/// Pages are delimited by `Operation::PageBreak`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    ops: Vec<Operation>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Operation>) {
        self.ops.extend(ops);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Operations of each page, page breaks excluded.
    pub fn pages(&self) -> Vec<&[Operation]> {
        self.ops
            .split(|op| matches!(op, Operation::PageBreak))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup() {
        assert_eq!(NodeKind::from_tag("h4"), NodeKind::Heading(4));
        assert_eq!(NodeKind::from_tag("strong"), NodeKind::Bold);
        assert_eq!(NodeKind::from_tag("em"), NodeKind::Italic);
        assert_eq!(NodeKind::from_tag("ol"), NodeKind::OrderedList);
        assert_eq!(NodeKind::from_tag("h7"), NodeKind::Ignored);
        assert_eq!(NodeKind::from_tag("div"), NodeKind::Ignored);
        assert_eq!(NodeKind::from_tag("hr"), NodeKind::Ignored);
    }

    #[test]
    fn pages_split_on_breaks() {
        let mut doc = OutputDocument::new();
        doc.push(Operation::heading("a", 1, None));
        doc.push(Operation::PageBreak);
        doc.push(Operation::heading("b", 1, None));
        doc.push(Operation::paragraph("c", Emphasis::NONE, None));

        let pages = doc.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 2);
    }
}

//! WordprocessingML package writer for an operation sequence.

mod parts;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::model::{Emphasis, ListStyle, Operation};
use crate::style::Rgb;
use parts::{NUM_BULLET, NUM_DECIMAL};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunStyle {
    bold: bool,
    italic: bool,
    color: Option<Rgb>,
}

impl RunStyle {
    fn new(emphasis: Emphasis, color: Option<Rgb>) -> Self {
        Self {
            bold: emphasis.bold,
            italic: emphasis.italic,
            color,
        }
    }
}

#[derive(Debug, Clone)]
struct Picture {
    rid: String,
    id: usize,
    name: String,
    cx: u64,
    cy: u64,
}

#[derive(Debug, Clone)]
enum Segment {
    Text { text: String, style: RunStyle },
    Link { text: String, style: RunStyle, rid: String },
    Picture(Picture),
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphStyle {
    Normal,
    Heading(u8),
    List(ListStyle),
}

#[derive(Debug, Clone)]
struct Paragraph {
    style: ParagraphStyle,
    segments: Vec<Segment>,
}

impl Paragraph {
    fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            segments: Vec::new(),
        }
    }

    fn with_text(style: ParagraphStyle, text: &str, run: RunStyle) -> Self {
        let mut p = Self::new(style);
        if !text.is_empty() {
            p.segments.push(Segment::Text {
                text: text.to_string(),
                style: run,
            });
        }
        p
    }
}

struct Media {
    target: String,
    bytes: Vec<u8>,
}

/// Everything needed to emit the package, gathered in one pass.
#[derive(Default)]
struct Layout {
    paragraphs: Vec<Paragraph>,
    link_to_rid: BTreeMap<String, String>,
    media: BTreeMap<String, Media>,
    media_exts: BTreeSet<String>,
}

fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn sanitize_href(href: &str) -> Option<String> {
    let h = href.trim();
    if h.is_empty() {
        return None;
    }
    let low = h.to_ascii_lowercase();
    if low.starts_with("javascript:") || low.starts_with("data:") || low.starts_with("vbscript:") {
        return None;
    }
    Some(h.to_string())
}

/// File extension for embedded bytes, sniffed first, then taken from the name.
fn media_extension(name: &str, bytes: &[u8]) -> String {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => "png".to_string(),
        Ok(image::ImageFormat::Jpeg) => "jpeg".to_string(),
        Ok(image::ImageFormat::Gif) => "gif".to_string(),
        Ok(image::ImageFormat::Bmp) => "bmp".to_string(),
        _ => name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "png".to_string()),
    }
}

/// Height for a picture scaled to `cx`, keeping the aspect ratio when the
/// pixel size can be read. Unreadable images are laid out square.
fn scaled_height(bytes: &[u8], cx: u64) -> u64 {
    let dims = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()
        .and_then(|r| r.into_dimensions().ok());
    match dims {
        Some((w, h)) if w > 0 => cx * u64::from(h) / u64::from(w),
        _ => cx,
    }
}

impl Layout {
    fn from_operations(ops: &[Operation]) -> Self {
        let mut layout = Layout::default();
        for href in ops.iter().filter_map(|op| match op {
            Operation::AddHyperlinkRun { href, .. } => sanitize_href(href),
            _ => None,
        }) {
            let next = layout.link_to_rid.len() + 10;
            layout
                .link_to_rid
                .entry(href)
                .or_insert_with(|| format!("rId{next}"));
        }

        let mut prev_was_list_item = false;
        for op in ops {
            match op {
                Operation::AddHeading { text, level, color } => {
                    let run = RunStyle::new(Emphasis::NONE, *color);
                    let level = (*level).clamp(1, 6);
                    layout
                        .paragraphs
                        .push(Paragraph::with_text(ParagraphStyle::Heading(level), text, run));
                }
                Operation::AddParagraph {
                    text,
                    emphasis,
                    color,
                } => {
                    let run = RunStyle::new(*emphasis, *color);
                    layout
                        .paragraphs
                        .push(Paragraph::with_text(ParagraphStyle::Normal, text, run));
                }
                Operation::AddListItem { text, style, color } => {
                    let run = RunStyle::new(Emphasis::NONE, *color);
                    layout
                        .paragraphs
                        .push(Paragraph::with_text(ParagraphStyle::List(*style), text, run));
                }
                Operation::AddHyperlinkRun { text, href, color } => {
                    let style = RunStyle::new(Emphasis::NONE, *color);
                    let seg = match sanitize_href(href).and_then(|h| layout.link_to_rid.get(&h)) {
                        Some(rid) => Segment::Link {
                            text: text.clone(),
                            style,
                            rid: rid.clone(),
                        },
                        None => Segment::Text {
                            text: text.clone(),
                            style,
                        },
                    };
                    if !prev_was_list_item || layout.paragraphs.is_empty() {
                        layout.paragraphs.push(Paragraph::new(ParagraphStyle::Normal));
                    }
                    if let Some(p) = layout.paragraphs.last_mut() {
                        p.segments.push(seg);
                    }
                }
                Operation::AddImage {
                    name,
                    bytes,
                    width_emu,
                } => {
                    let id = layout.media.len() + 1;
                    let rid = format!("rIdImg{id}");
                    let ext = media_extension(name, bytes);
                    let cy = scaled_height(bytes, *width_emu);
                    layout.media.insert(
                        rid.clone(),
                        Media {
                            target: format!("media/image{id}.{ext}"),
                            bytes: bytes.clone(),
                        },
                    );
                    layout.media_exts.insert(ext);

                    let mut p = Paragraph::new(ParagraphStyle::Normal);
                    p.segments.push(Segment::Picture(Picture {
                        rid,
                        id,
                        name: name.clone(),
                        cx: *width_emu,
                        cy,
                    }));
                    layout.paragraphs.push(p);
                }
                Operation::PageBreak => {
                    let mut p = Paragraph::new(ParagraphStyle::Normal);
                    p.segments.push(Segment::PageBreak);
                    layout.paragraphs.push(p);
                }
            }
            prev_was_list_item = matches!(op, Operation::AddListItem { .. });
        }
        layout
    }
}

fn run_properties(style: RunStyle) -> String {
    let mut out = String::new();
    if style.bold {
        out.push_str("<w:b/>");
    }
    if style.italic {
        out.push_str("<w:i/>");
    }
    if let Some(color) = style.color {
        out.push_str(&format!("<w:color w:val=\"{}\"/>", color.to_hex()));
    }
    out
}

fn run_xml(text: &str, style: RunStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str("<w:r>");
    let props = run_properties(style);
    if !props.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&props);
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape_text(text));
    out.push_str("</w:t></w:r>");
    out
}

fn picture_xml(pic: &Picture) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Picture {id}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rid}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        cx = pic.cx,
        cy = pic.cy,
        id = pic.id,
        name = xml_escape_text(&pic.name),
        rid = pic.rid,
    )
}

fn paragraph_xml(p: &Paragraph) -> String {
    let mut out = String::new();
    out.push_str("<w:p>");

    match p.style {
        ParagraphStyle::Normal => {}
        ParagraphStyle::Heading(level) => {
            out.push_str(&format!("<w:pPr><w:pStyle w:val=\"Heading{level}\"/></w:pPr>"));
        }
        ParagraphStyle::List(list) => {
            let (style_id, num_id) = match list {
                ListStyle::Bullet => ("ListBullet", NUM_BULLET),
                ListStyle::Number => ("ListNumber", NUM_DECIMAL),
            };
            out.push_str("<w:pPr>");
            out.push_str(&format!("<w:pStyle w:val=\"{style_id}\"/>"));
            out.push_str("<w:numPr>");
            out.push_str("<w:ilvl w:val=\"0\"/>");
            out.push_str(&format!("<w:numId w:val=\"{num_id}\"/>"));
            out.push_str("</w:numPr>");
            out.push_str("</w:pPr>");
        }
    }

    for seg in &p.segments {
        match seg {
            Segment::Text { text, style } => out.push_str(&run_xml(text, *style)),
            Segment::Link { text, style, rid } => {
                if text.is_empty() {
                    continue;
                }
                out.push_str(&format!("<w:hyperlink r:id=\"{rid}\" w:history=\"1\">"));
                out.push_str(&run_xml(text, *style));
                out.push_str("</w:hyperlink>");
            }
            Segment::Picture(pic) => out.push_str(&picture_xml(pic)),
            Segment::PageBreak => out.push_str("<w:r><w:br w:type=\"page\"/></w:r>"),
        }
    }

    out.push_str("</w:p>");
    out
}

fn document_xml(paragraphs: &[Paragraph]) -> String {
    let body: String = paragraphs.iter().map(paragraph_xml).collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:wpc="http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas"
 xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"
 xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
 xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
 xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#,
        body = body
    )
}

fn write_package<W: Write + Seek>(sink: W, ops: &[Operation]) -> Result<W> {
    let layout = Layout::from_operations(ops);
    let media_targets: BTreeMap<String, String> = layout
        .media
        .iter()
        .map(|(rid, m)| (rid.clone(), m.target.clone()))
        .collect();

    let mut zip = ZipWriter::new(sink);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts)?;
    zip.write_all(parts::content_types_xml(&layout.media_exts).as_bytes())?;

    zip.start_file("_rels/.rels", opts)?;
    zip.write_all(parts::rels_xml().as_bytes())?;

    zip.start_file("word/document.xml", opts)?;
    zip.write_all(document_xml(&layout.paragraphs).as_bytes())?;

    zip.start_file("word/styles.xml", opts)?;
    zip.write_all(parts::styles_xml().as_bytes())?;

    zip.start_file("word/numbering.xml", opts)?;
    zip.write_all(parts::numbering_xml().as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opts)?;
    zip.write_all(parts::document_rels_xml(&layout.link_to_rid, &media_targets).as_bytes())?;

    for media in layout.media.values() {
        zip.start_file(format!("word/{}", media.target), opts)?;
        zip.write_all(&media.bytes)?;
    }

    Ok(zip.finish()?)
}

/// Serializes `ops` into an in-memory `.docx`.
pub fn docx_bytes(ops: &[Operation]) -> Result<Vec<u8>> {
    let cursor = write_package(Cursor::new(Vec::new()), ops)?;
    Ok(cursor.into_inner())
}

pub fn write_docx(out_path: &Path, ops: &[Operation]) -> Result<()> {
    let f = File::create(out_path)?;
    write_package(f, ops)?;
    Ok(())
}

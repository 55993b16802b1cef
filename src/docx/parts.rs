//! Fixed and near-fixed package parts.

use std::collections::{BTreeMap, BTreeSet};

use super::xml_escape_text;

pub const REL_STYLES: &str = "rId1";
pub const REL_NUMBERING: &str = "rId2";

/// Numbering definitions in `numbering.xml`.
pub const NUM_BULLET: u32 = 1;
pub const NUM_DECIMAL: u32 = 2;

pub fn media_content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpeg" | "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

pub fn content_types_xml(media_exts: &BTreeSet<String>) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    out.push('\n');
    out.push_str(
        r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    out.push('\n');
    out.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    out.push('\n');
    for ext in media_exts {
        out.push_str(&format!(
            r#"  <Default Extension="{ext}" ContentType="{ct}"/>"#,
            ext = xml_escape_text(ext),
            ct = media_content_type(ext),
        ));
        out.push('\n');
    }
    out.push_str(r#"  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#);
    out.push('\n');
    out.push_str(r#"  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#);
    out.push('\n');
    out.push_str(r#"  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#);
    out.push('\n');
    out.push_str("</Types>");
    out
}

pub fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

/// `link_to_rid` maps href → id; `media` maps id → target under `word/`.
pub fn document_rels_xml(
    link_to_rid: &BTreeMap<String, String>,
    media: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    out.push('\n');
    out.push_str(&format!(
        r#"  <Relationship Id="{REL_STYLES}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"  <Relationship Id="{REL_NUMBERING}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#
    ));
    out.push('\n');
    for (href, rid) in link_to_rid {
        out.push_str(&format!(
            r#"  <Relationship Id="{rid}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{href}" TargetMode="External"/>"#,
            rid = rid,
            href = xml_escape_text(href),
        ));
        out.push('\n');
    }
    for (rid, target) in media {
        out.push_str(&format!(
            r#"  <Relationship Id="{rid}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#,
        ));
        out.push('\n');
    }
    out.push_str("</Relationships>");
    out
}

pub fn styles_xml() -> String {
    let mut out = String::new();
    out.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
    );
    // Half-points, largest first.
    let sizes = [32, 28, 26, 24, 22, 22];
    for (i, sz) in sizes.iter().enumerate() {
        let level = i + 1;
        out.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="Heading{level}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:keepNext/>
      <w:spacing w:before="{before}" w:after="120"/>
      <w:outlineLvl w:val="{outline}"/>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:color w:val="2E74B5"/>
      <w:sz w:val="{sz}"/>
    </w:rPr>
  </w:style>
"#,
            before = if level == 1 { 360 } else { 240 },
            outline = i,
        ));
    }
    out.push_str(
        r#"  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:uiPriority w:val="99"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListNumber">
    <w:name w:val="List Number"/>
    <w:basedOn w:val="Normal"/>
    <w:uiPriority w:val="99"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#,
    );
    out
}

pub fn numbering_xml() -> String {
    fn levels(fmt: &str, text: impl Fn(u32) -> String) -> String {
        (0..9)
            .map(|ilvl| {
                format!(
                    r#"    <w:lvl w:ilvl="{ilvl}"><w:start w:val="1"/><w:numFmt w:val="{fmt}"/><w:lvlText w:val="{text}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="360"/></w:pPr></w:lvl>"#,
                    text = text(ilvl),
                    left = 720 * (ilvl + 1),
                ) + "\n"
            })
            .collect()
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="hybridMultilevel"/>
{bullets}  </w:abstractNum>
  <w:abstractNum w:abstractNumId="2">
    <w:multiLevelType w:val="hybridMultilevel"/>
{decimals}  </w:abstractNum>
  <w:num w:numId="{NUM_BULLET}"><w:abstractNumId w:val="1"/></w:num>
  <w:num w:numId="{NUM_DECIMAL}"><w:abstractNumId w:val="2"/></w:num>
</w:numbering>"#,
        bullets = levels("bullet", |_| "•".to_string()),
        decimals = levels("decimal", |ilvl| format!("%{}.", ilvl + 1)),
    )
}

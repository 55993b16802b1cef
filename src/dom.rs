//! Small helpers over the html5ever `RcDom` tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub fn html5_parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

pub fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn attr_get(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Concatenates every descendant text node, in document order.
pub fn text_content(node: &Handle) -> String {
    fn walk(node: &Handle, out: &mut String) {
        if let NodeData::Text { contents } = &node.data {
            out.push_str(&contents.borrow());
        }
        for c in node.children.borrow().iter() {
            walk(c, out);
        }
    }

    let mut out = String::new();
    walk(node, &mut out);
    out
}

/// First element (pre-order) whose `id` attribute equals `id`.
pub fn find_by_id(node: &Handle, id: &str) -> Option<Handle> {
    if is_element(node) && attr_get(node, "id").as_deref() == Some(id) {
        return Some(node.clone());
    }
    for c in node.children.borrow().iter() {
        if let Some(found) = find_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

/// First descendant element named `tag`, not including `node` itself.
pub fn find_descendant(node: &Handle, tag: &str) -> Option<Handle> {
    for c in node.children.borrow().iter() {
        if tag_lower(c).as_deref() == Some(tag) {
            return Some(c.clone());
        }
        if let Some(found) = find_descendant(c, tag) {
            return Some(found);
        }
    }
    None
}

pub fn has_element_descendant(node: &Handle) -> bool {
    node.children
        .borrow()
        .iter()
        .any(|c| is_element(c) || has_element_descendant(c))
}

/// Direct element children named `tag`.
pub fn children_named(node: &Handle, tag: &str) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| tag_lower(c).as_deref() == Some(tag))
        .cloned()
        .collect()
}

/// All descendant elements of `node` in document order, excluding `node`.
pub fn descendant_elements(node: &Handle) -> Vec<Handle> {
    fn walk(node: &Handle, out: &mut Vec<Handle>) {
        for c in node.children.borrow().iter() {
            if is_element(c) {
                out.push(c.clone());
            }
            walk(c, out);
        }
    }

    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

pub fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
                in_ws = true;
            }
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_anchor_and_flattens_text() {
        let dom = html5_parse(r#"<div id="mainbody"><p>Hello <b>big</b> world</p></div>"#);
        let anchor = find_by_id(&dom.document, "mainbody").unwrap();
        assert_eq!(text_content(&anchor), "Hello big world");
        assert!(find_by_id(&dom.document, "missing").is_none());
    }

    #[test]
    fn descendant_order_is_document_order() {
        let dom = html5_parse("<div id=a><h1>x</h1><ul><li>1</li></ul><i>y</i></div>");
        let anchor = find_by_id(&dom.document, "a").unwrap();
        let tags: Vec<_> = descendant_elements(&anchor)
            .iter()
            .filter_map(tag_lower)
            .collect();
        assert_eq!(tags, ["h1", "ul", "li", "i"]);
    }

    #[test]
    fn direct_children_skip_nested_lists() {
        let dom = html5_parse("<ul id=l><li>a<ul><li>b</li></ul></li><li>c</li></ul>");
        let list = find_by_id(&dom.document, "l").unwrap();
        assert_eq!(children_named(&list, "li").len(), 2);
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_ws("a \n\t b  c"), "a b c");
    }
}

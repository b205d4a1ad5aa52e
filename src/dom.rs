//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate exposing the node operations the
//! extraction phases need: tag names, own vs. full text, attribute access,
//! relabelling, removal, separator insertion and deep cloning into a fresh
//! document.
//!
//! Functions take `NodeRef` so that callers can hold stable node identities
//! (`NodeId`) across tree mutations.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

use dom_query::{Element, NodeData};

pub use tendril::StrTendril;

use crate::patterns::WHITESPACE_NORMALIZE;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Tag/Node Information ===

/// Get tag name (lowercase); `None` for text, comment and document nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether the node is an element with the given tag name.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node).is_some_and(|t| t == tag)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get element class attribute, empty when absent.
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    get_attribute(node, "class").unwrap_or_default()
}

/// Get element ID attribute, empty when absent.
#[must_use]
pub fn id(node: &NodeRef) -> String {
    get_attribute(node, "id").unwrap_or_default()
}

/// Names of all attributes present on the node.
#[must_use]
pub fn attribute_names(node: &NodeRef) -> Vec<String> {
    node.attrs()
        .iter()
        .map(|attr| attr.name.local.to_string())
        .collect()
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

// === Tree Navigation ===

/// Get all child nodes, including text and comment nodes.
#[inline]
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
}

/// Get direct element children
#[must_use]
pub fn children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// All descendant elements of `node` in document order, excluding `node`.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    collect_elements(node, &mut out);
    out
}

fn collect_elements<'a>(node: &NodeRef<'a>, out: &mut Vec<NodeRef<'a>>) {
    for child in children(node) {
        out.push(child);
        collect_elements(&child, out);
    }
}

/// Descendant elements with the given tag, in document order.
#[must_use]
pub fn descendants_by_tag<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    descendant_elements(node)
        .into_iter()
        .filter(|n| is_tag(n, tag))
        .collect()
}

/// Previous sibling, skipping text nodes that hold only whitespace.
#[must_use]
pub fn previous_significant_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if !(s.is_text() && s.text().trim().is_empty()) {
            return Some(s);
        }
        sibling = s.prev_sibling();
    }
    None
}

// === Text Content ===

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Whitespace-normalized text of the node and all its descendants.
#[must_use]
pub fn text(node: &NodeRef) -> String {
    normalize_whitespace(&node.text())
}

/// Whitespace-normalized text of the node's direct text children only.
#[must_use]
pub fn own_text(node: &NodeRef) -> String {
    let raw: String = node
        .children()
        .iter()
        .filter(|child| child.is_text())
        .map(|child| child.text().to_string())
        .collect();
    normalize_whitespace(&raw)
}

/// Number of characters (not bytes) in `text`.
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> StrTendril {
    node.html()
}

// === Tree Manipulation ===

/// Detach the node (and its subtree) from the tree.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Rename element tag, keeping attributes and children.
#[inline]
pub fn rename(node: &NodeRef, new_tag: &str) {
    node.rename(new_tag);
}

/// Insert a new text node right after `node`.
pub fn insert_text_after(node: &NodeRef, text: &str) {
    let text_node = node.tree.new_text(text);
    node.insert_after(&text_node);
}

/// Append a new text node as the last child of `node`.
pub fn append_text(node: &NodeRef, text: &str) {
    let text_node = node.tree.new_text(text);
    node.append_child(&text_node);
}

/// Move `node` to the position of `target`, detaching `target`.
pub fn replace_with_node(target: &NodeRef, node: &NodeRef) {
    node.remove_from_parent();
    target.insert_before(node);
    target.remove_from_parent();
}

// === Cloning ===

/// Deep-clone the element and text nodes of `nodes`, in order, into a new document.
///
/// Elements keep their qualified names, so void elements such as `img` still
/// serialize without an end tag. Comments, doctypes and processing
/// instructions are not copied.
#[must_use]
pub fn clone_into_document(nodes: &[NodeRef]) -> Document {
    let doc = Document::default();
    let root = doc.root();
    for node in nodes {
        clone_node(node, &root);
    }
    doc
}

fn clone_node(node: &NodeRef, parent: &NodeRef) {
    if node.is_text() {
        let copy = parent.tree.new_text(node.text());
        parent.append_child(&copy);
        return;
    }

    let Some(element) = node.element_ref().map(|el| Element {
        template_contents: None,
        ..el.clone()
    }) else {
        return;
    };
    let copy = NodeRef::new(parent.tree.create_node(NodeData::Element(element)), parent.tree);
    parent.append_child(&copy);
    for child in node.children() {
        clone_node(&child, &copy);
    }
}

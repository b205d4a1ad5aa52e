//! Basic sanitization before scoring.
//!
//! Removes scripts, styles and comments from the parsed tree and, when the
//! configuration asks for it, elements whose class or id marks them as
//! unlikely content.

use log::{debug, trace};

use crate::configuration::Configuration;
use crate::dom::{self, Document, NodeRef};

/// Elements removed together with their descendants.
const NON_CONTENT_TAGS: &[&str] = &["script", "noscript", "style"];

/// Sanitize `doc` in place.
pub fn preprocess(doc: &Document, config: &Configuration) {
    debug!("preprocess");
    strip_unlikely_candidates(doc, config);
    remove_scripts_and_styles(doc);
    remove_comments(&doc.root());
}

/// Remove elements under `body` whose class or id matches the negative pattern.
///
/// Often removes far more than intended, hence gated by
/// [`Configuration::strip_unlikely_candidates`].
fn strip_unlikely_candidates(doc: &Document, config: &Configuration) {
    if !config.strip_unlikely_candidates {
        return;
    }

    for node in doc.select("body *").nodes() {
        let class_name = dom::class_name(node).to_lowercase();
        let id = dom::id(node).to_lowercase();
        if config.negative_classes_and_ids.is_match(&class_name)
            || config.negative_classes_and_ids.is_match(&id)
        {
            trace!("strip_unlikely_candidates: removing <{}> class={class_name:?} id={id:?}", dom::tag_name(node).unwrap_or_default());
            dom::remove(node);
        }
    }
}

fn remove_scripts_and_styles(doc: &Document) {
    for tag in NON_CONTENT_TAGS {
        for node in doc.select(tag).nodes() {
            trace!("remove_scripts_and_styles: removing <{tag}>");
            dom::remove(node);
        }
    }
}

/// Depth-first comment removal. The index only advances past kept nodes.
fn remove_comments(node: &NodeRef) {
    let mut children = dom::child_nodes(node);
    let mut i = 0;
    while i < children.len() {
        let child = children[i];
        if child.is_comment() {
            trace!("remove_comments: removing comment");
            dom::remove(&child);
            children.remove(i);
        } else {
            remove_comments(&child);
            i += 1;
        }
    }
}

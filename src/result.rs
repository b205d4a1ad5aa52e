//! Result type for extraction output.

use std::fmt;

use crate::dom::{self, Document};
use crate::images::ImageCandidate;

/// Article body extracted from an HTML document.
///
/// The document is detached from the parsed input: it only holds clones of
/// the nodes that survived postprocessing. It is empty when no candidate
/// root was found.
pub struct Extraction {
    /// Sanitized article body.
    pub document: Document,

    /// Images found around the candidate root, heaviest first.
    pub images: Vec<ImageCandidate>,
}

impl Extraction {
    /// Serialized article body.
    #[must_use]
    pub fn html(&self) -> String {
        self.document.html().to_string()
    }

    /// Whitespace-normalized plain text of the article body.
    #[must_use]
    pub fn text(&self) -> String {
        dom::text(&self.document.root())
    }

    /// Whether nothing survived extraction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        dom::child_nodes(&self.document.root()).is_empty()
    }
}

impl fmt::Debug for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extraction")
            .field("html", &self.html())
            .field("images", &self.images)
            .finish()
    }
}

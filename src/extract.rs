//! Extraction pipeline.
//!
//! Runs the phases in order on one mutable tree: preprocessing, candidate
//! selection, image collection and postprocessing.

use log::debug;

use crate::configuration::Configuration;
use crate::dom::{self, Document};
use crate::images::collect_image_candidates;
use crate::postprocess::Postprocessor;
use crate::preprocess::preprocess;
use crate::result::Extraction;
use crate::scoring::ScoringEngine;

/// Parse `html` and extract its article body.
pub(crate) fn extract_html(html: &str, config: &Configuration) -> Extraction {
    debug!("extracting from {} bytes of markup", html.len());
    let doc = dom::parse(html);
    extract_document(&doc, config)
}

/// Extract the article body of an already parsed document.
///
/// The document is modified in place: non-content elements are removed and
/// the candidate root is sanitized. The returned [`Extraction`] does not
/// borrow from it.
#[must_use]
pub fn extract_document(doc: &Document, config: &Configuration) -> Extraction {
    preprocess(doc, config);

    let selection = ScoringEngine::new(config).select_candidate(doc);
    let root = selection.root.as_ref();
    let images = collect_image_candidates(root);
    debug!("{} image candidates", images.len());

    let document = Postprocessor::new(config).postprocess(root, &images, &selection.scores);
    Extraction { document, images }
}

//! Image candidates around the candidate root.
//!
//! Every `img` below the root (or below its parent when the root itself holds
//! none) is weighted by its declared size, descriptive text and source type.
//! Earlier images count more: each weight is scaled by a factor that halves
//! for every accepted image. Images with a positive weight are protected from
//! pruning during postprocessing.

use std::collections::HashSet;

use crate::dom::{self, NodeId, NodeRef};

/// Minimum declared width/height for an image to count as content.
const MIN_DIMENSION: u32 = 50;

/// `alt`/`title` texts longer than this describe the image well.
const DESCRIPTIVE_TEXT_LENGTH: usize = 35;

/// An `img` element with its heuristic weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Identity of the `img` element in the scored tree.
    pub node: NodeId,
    /// Raw `src` attribute.
    pub src: String,
    /// `alt` attribute, empty when absent.
    pub alt: String,
    /// `title` attribute, empty when absent.
    pub title: String,
    /// Declared width, if it parses as an integer.
    pub width: Option<u32>,
    /// Declared height, if it parses as an integer.
    pub height: Option<u32>,
    /// Whether the enclosing element carries `rel="nofollow"`.
    pub no_follow: bool,
    /// Heuristic weight; positive weights protect the image from pruning.
    pub weight: i32,
}

/// Collect and weight image candidates for `root`, heaviest first.
///
/// Ties keep document order.
#[must_use]
pub fn collect_image_candidates(root: Option<&NodeRef>) -> Vec<ImageCandidate> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut elements = dom::descendants_by_tag(root, "img");
    if elements.is_empty() {
        if let Some(parent) = root.parent() {
            elements = dom::descendants_by_tag(&parent, "img");
        }
    }

    let mut factor = 1.0_f64;
    let mut candidates = Vec::new();
    for element in &elements {
        let Some(mut candidate) = image_candidate(element) else {
            continue;
        };
        candidate.weight = scale(candidate.weight, factor);
        candidates.push(candidate);
        factor /= 2.0;
    }

    candidates.sort_by(|a, b| b.weight.cmp(&a.weight));
    candidates
}

/// Identities of the candidates with a positive weight.
#[must_use]
pub fn positive_weight_images(images: &[ImageCandidate]) -> HashSet<NodeId> {
    images
        .iter()
        .filter(|image| image.weight > 0)
        .map(|image| image.node)
        .collect()
}

fn image_candidate(element: &NodeRef) -> Option<ImageCandidate> {
    let src = dom::get_attribute(element, "src").unwrap_or_default();
    if src.trim().is_empty() {
        return None;
    }

    let alt = dom::get_attribute(element, "alt").unwrap_or_default();
    let title = dom::get_attribute(element, "title").unwrap_or_default();
    let width = dimension(element, "width");
    let height = dimension(element, "height");
    let no_follow = element
        .parent()
        .and_then(|parent| dom::get_attribute(&parent, "rel"))
        .is_some_and(|rel| rel.contains("nofollow"));

    let mut weight = 0;
    weight += dimension_weight(height);
    weight += dimension_weight(width);
    if dom::char_len(&alt) > DESCRIPTIVE_TEXT_LENGTH {
        weight += 20;
    }
    if dom::char_len(&title) > DESCRIPTIVE_TEXT_LENGTH {
        weight += 20;
    }
    if no_follow {
        weight -= 40;
    }
    weight += extension_weight(&src);

    Some(ImageCandidate {
        node: element.id,
        src,
        alt,
        title,
        width,
        height,
        no_follow,
        weight,
    })
}

fn dimension(element: &NodeRef, name: &str) -> Option<u32> {
    dom::get_attribute(element, name).and_then(|value| value.trim().parse().ok())
}

fn dimension_weight(dimension: Option<u32>) -> i32 {
    match dimension {
        Some(value) if value >= MIN_DIMENSION => 20,
        Some(_) => -20,
        None => 0,
    }
}

/// Animated gifs are mostly decoration; jpegs are mostly photos.
fn extension_weight(src: &str) -> i32 {
    let path = src.split(['?', '#']).next().unwrap_or(src).to_lowercase();
    if path.ends_with(".gif") {
        -20
    } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
        5
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale(weight: i32, factor: f64) -> i32 {
    (f64::from(weight) * factor) as i32
}

//! Gravity scoring and candidate root selection.
//!
//! Elements are weighted by matching their class, id and style against the
//! configured patterns, and by the amount and shape of text in their direct
//! children. Important nodes additionally get a positional prior that favors
//! content appearing early in the document. The element with the highest
//! combined score becomes the candidate article root.
//!
//! Scores are kept in a [`GravityScores`] side map keyed by node identity, so
//! the tree itself is never annotated.

use std::collections::{HashMap, HashSet};

use log::debug;
use regex::Regex;

use crate::configuration::Configuration;
use crate::dom::{self, Document, NodeId, NodeRef};

/// Positional prior of the first important node.
const INITIAL_POSITIONAL_SCORE: i32 = 100;

/// Children with less own text than this are ignored.
const MIN_CHILD_TEXT_LENGTH: usize = 20;

/// Children with more own text than this get a length bonus.
const LONG_CHILD_TEXT_LENGTH: usize = 200;

/// Paragraph children longer than this count towards the paragraph-rich bonus.
const PARAGRAPH_TEXT_LENGTH: usize = 50;

/// Formatting artifacts counted by the formatting penalty.
const FORMATTING_ARTIFACTS: &[&str] = &["&quot;", "&lt;", "&gt;", "px"];

const HEADER_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const TABULAR_TAGS: &[&str] = &["table", "li", "td", "th"];

/// Per-element gravity scores, keyed by node identity.
///
/// Absent entries read as `0`.
#[derive(Debug, Clone, Default)]
pub struct GravityScores {
    scores: HashMap<NodeId, i32>,
}

impl GravityScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of `id`, `0` when it was never scored.
    #[must_use]
    pub fn get(&self, id: NodeId) -> i32 {
        self.scores.get(&id).copied().unwrap_or(0)
    }

    /// Whether `id` carries a score.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    pub fn set(&mut self, id: NodeId, score: i32) {
        self.scores.insert(id, score);
    }

    /// Add `delta` to the current score of `id`.
    pub fn add(&mut self, id: NodeId, delta: i32) {
        *self.scores.entry(id).or_insert(0) += delta;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Outcome of scoring a document.
pub struct CandidateSelection<'a> {
    /// Selected article root, `None` when nothing scored above zero.
    pub root: Option<NodeRef<'a>>,
    /// Gravity scores accumulated while scoring.
    pub scores: GravityScores,
}

/// Weights elements and selects the candidate article root.
pub struct ScoringEngine<'c> {
    config: &'c Configuration,
    important_nodes: Regex,
}

impl<'c> ScoringEngine<'c> {
    #[must_use]
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            config,
            important_nodes: config.anchored_important_nodes(),
        }
    }

    /// Score the document and pick the candidate root.
    ///
    /// Every important node is weighted in document order first, so that the
    /// gravity adjustments made while weighting earlier nodes are visible when
    /// combining. Ties go to the node seen first.
    #[must_use]
    pub fn select_candidate<'a>(&self, doc: &'a Document) -> CandidateSelection<'a> {
        let mut scores = GravityScores::new();
        let nodes = self.important_nodes(doc, &mut scores);

        let weights: Vec<i32> = nodes
            .iter()
            .map(|node| self.weight(node, &mut scores))
            .collect();

        let mut best: Option<(NodeRef<'a>, i32)> = None;
        for (node, weight) in nodes.iter().zip(weights) {
            let combined = weight + scores.get(node.id);
            if combined > best.map_or(0, |(_, score)| score) {
                best = Some((*node, combined));
            }
        }

        match &best {
            Some((node, score)) => debug!(
                "candidate root <{}> with score {score} among {} important nodes",
                dom::tag_name(node).unwrap_or_default(),
                nodes.len()
            ),
            None => debug!("no candidate root among {} important nodes", nodes.len()),
        }

        CandidateSelection {
            root: best.map(|(node, _)| node),
            scores,
        }
    }

    /// Elements below `body` whose tag matches the important-node pattern, in
    /// document order.
    ///
    /// Each gets a positional score: 100 for the first, halved for every next one.
    pub fn important_nodes<'a>(
        &self,
        doc: &'a Document,
        scores: &mut GravityScores,
    ) -> Vec<NodeRef<'a>> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        let mut score = INITIAL_POSITIONAL_SCORE;

        for node in doc.select("body *").nodes() {
            let Some(tag) = dom::tag_name(node) else {
                continue;
            };
            if !self.important_nodes.is_match(&tag) || !seen.insert(node.id) {
                continue;
            }
            scores.set(node.id, score);
            nodes.push(*node);
            score /= 2;
        }
        nodes
    }

    /// Weight of an element: pattern matches, own text length and child text.
    ///
    /// Adjusts the gravity scores of some direct children as a side effect.
    pub fn weight(&self, node: &NodeRef, scores: &mut GravityScores) -> i32 {
        let own_text_length = dom::char_len(&dom::own_text(node));
        self.calc_weight(node)
            + rounded_ratio(own_text_length, 10)
            + self.weight_child_nodes(node, scores)
    }

    /// Class, id and style pattern matches. All bonuses and penalties add up.
    #[must_use]
    pub fn calc_weight(&self, node: &NodeRef) -> i32 {
        let class_name = dom::class_name(node);
        let id = dom::id(node);
        let style = dom::get_attribute(node, "style").unwrap_or_default();
        let config = self.config;

        let mut weight = 0;
        if config.positive_classes_and_ids.is_match(&class_name) {
            weight += 35;
        }
        if config.positive_classes_and_ids.is_match(&id) {
            weight += 40;
        }
        if config.unlikely_classes_and_ids.is_match(&class_name) {
            weight -= 20;
        }
        if config.unlikely_classes_and_ids.is_match(&id) {
            weight -= 20;
        }
        if config.negative_classes_and_ids.is_match(&class_name) {
            weight -= 50;
        }
        if config.negative_classes_and_ids.is_match(&id) {
            weight -= 50;
        }
        if !style.is_empty() && config.negative_styles.is_match(&style) {
            weight -= 50;
        }
        weight
    }

    /// Weight contributed by the text of direct children.
    ///
    /// Less nesting between an element and its text gives a better chance of
    /// being picked, so only direct children count.
    fn weight_child_nodes(&self, node: &NodeRef, scores: &mut GravityScores) -> i32 {
        let mut weight = 0;
        let mut has_caption = false;
        let mut paragraphs = 0;

        for child in dom::children(node) {
            let tag = dom::tag_name(&child).unwrap_or_default();

            // Paragraphs count all their text, including inline formatting.
            let own_text = if tag == "p" {
                dom::text(&child)
            } else {
                dom::own_text(&child)
            };
            let length = dom::char_len(&own_text);
            if length < MIN_CHILD_TEXT_LENGTH {
                continue;
            }

            if length > LONG_CHILD_TEXT_LENGTH {
                weight += to_score((length / 10).max(50));
            }

            if tag == "h1" || tag == "h2" {
                weight += 30;
            } else if tag == "div" || tag == "p" {
                let adjustment = formatting_adjustment(&own_text);
                scores.add(child.id, adjustment);
                weight += adjustment;

                if tag == "p" && length > PARAGRAPH_TEXT_LENGTH {
                    paragraphs += 1;
                }
                if dom::class_name(&child).to_lowercase() == "caption" {
                    has_caption = true;
                }
            }
        }

        if has_caption {
            weight += 30;
        }

        if paragraphs >= 2 {
            for child in dom::children(node) {
                let tag = dom::tag_name(&child).unwrap_or_default();
                if HEADER_TAGS.contains(&tag.as_str()) {
                    scores.add(child.id, 20);
                } else if TABULAR_TAGS.contains(&tag.as_str()) {
                    scores.add(child.id, -30);
                } else if tag == "p" {
                    scores.add(child.id, 30);
                }
            }
        }

        weight
    }
}

/// Heavily formatted text (escaped markup, pixel sizes) is unlikely to be prose.
fn formatting_adjustment(text: &str) -> i32 {
    let artifacts: usize = FORMATTING_ARTIFACTS
        .iter()
        .map(|artifact| text.matches(artifact).count())
        .sum();
    if artifacts > 5 {
        -30
    } else {
        rounded_ratio(dom::char_len(text), 25)
    }
}

/// `value / divisor`, rounded half up.
fn rounded_ratio(value: usize, divisor: usize) -> i32 {
    to_score((value + divisor / 2) / divisor)
}

fn to_score(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

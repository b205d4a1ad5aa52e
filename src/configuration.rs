//! Rule set shared by the preprocessor, scoring engine and postprocessor.
//!
//! A [`Configuration`] is an immutable value: build it once (from a preset or
//! with overrides) and share it across extractions. Two presets exist,
//! [`Configuration::standard`] and [`Configuration::standard_with_images`],
//! also available as the [`STANDARD`] and [`STANDARD_WITH_IMAGES`] statics.
//!
//! # Example
//!
//! ```rust
//! use article_gravity::Configuration;
//!
//! let config = Configuration::from_json(r#"{ "min_length_for_paragraphs": 80 }"#)?;
//! assert_eq!(config.min_length_for_paragraphs, 80);
//! assert!(config.retain_tags.contains("p"));
//! # Ok::<(), article_gravity::Error>(())
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::patterns;

/// Shared standard (text-only) configuration.
pub static STANDARD: LazyLock<Configuration> = LazyLock::new(Configuration::standard);

/// Shared configuration that keeps images.
pub static STANDARD_WITH_IMAGES: LazyLock<Configuration> =
    LazyLock::new(Configuration::standard_with_images);

const MIN_LENGTH_FOR_PARAGRAPHS: usize = 50;

const REMOVE_TAGS_BUT_RETAIN_CONTENT: &[&str] = &[
    "font", "table", "tbody", "tr", "td", "div", "ol", "ul", "li", "span",
];

const RETAIN_TAGS: &[&str] = &[
    "p", "b", "i", "u", "strong", "em", "a", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote",
];

const TAGS_EXEMPT_FROM_MIN_LENGTH_CHECK: &[&str] = &[
    "b", "i", "u", "strong", "em", "a", "pre", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
];

const ATTRIBUTES_TO_RETAIN: &[&str] = &["href", "src", "alt"];

const RETAIN_TAGS_TOP_LEVEL: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "li",
];

const IMAGE_TAGS: &[&str] = &["img", "figure"];

const IMAGE_ATTRIBUTES: &[&str] = &["src", "alt"];

/// Immutable extraction rules.
///
/// All fields are public for inspection and for building custom rule sets
/// with struct update syntax.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Text shorter than this (in characters) is not considered a paragraph.
    ///
    /// Default: `50`
    pub min_length_for_paragraphs: usize,

    /// Class/id names that raise an element's weight.
    pub positive_classes_and_ids: Regex,

    /// Class/id names that strongly lower an element's weight.
    pub negative_classes_and_ids: Regex,

    /// Class/id names that mildly lower an element's weight.
    pub unlikely_classes_and_ids: Regex,

    /// Inline styles that lower an element's weight.
    pub negative_styles: Regex,

    /// Inline styles (or classes) that remove an element during postprocessing.
    pub unlikely_styles: Regex,

    /// Tag names eligible for the positional prior.
    ///
    /// Always matched against the whole tag name, so `p|pre` accepts `pre`
    /// even when the pattern itself is not anchored.
    pub important_nodes: Regex,

    /// Tags that should not be output, but still may contain interesting content.
    /// They are relabelled to `p`.
    pub remove_tags_but_retain_content: HashSet<String>,

    /// Tags allowed anywhere in the output.
    pub retain_tags: HashSet<String>,

    /// Tags allowed as direct children of the output document.
    ///
    /// Short inline tags such as `<a>` are kept inside larger paragraphs but
    /// never as stray top-level siblings.
    pub retain_tags_top_level: HashSet<String>,

    /// Tags whose content is not subject to `min_length_for_paragraphs`.
    pub tags_exempt_from_min_length_check: HashSet<String>,

    /// Tags that may be output without any text.
    pub tags_exempt_from_empty_text_check: HashSet<String>,

    /// Attribute names kept in the output. All others are removed.
    pub attributes_to_retain: HashSet<String>,

    /// Remove elements matching `negative_classes_and_ids` before scoring.
    ///
    /// This removes much more than the unlikely candidates on real pages, so it
    /// is off in both presets.
    ///
    /// Default: `false`
    pub strip_unlikely_candidates: bool,
}

impl Configuration {
    /// Text-only preset.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            min_length_for_paragraphs: MIN_LENGTH_FOR_PARAGRAPHS,
            positive_classes_and_ids: patterns::POSITIVE_CLASSES_AND_IDS_RE.clone(),
            negative_classes_and_ids: patterns::NEGATIVE_CLASSES_AND_IDS_RE.clone(),
            unlikely_classes_and_ids: patterns::UNLIKELY_CLASSES_AND_IDS_RE.clone(),
            negative_styles: patterns::NEGATIVE_STYLES_RE.clone(),
            unlikely_styles: patterns::UNLIKELY_STYLES_RE.clone(),
            important_nodes: patterns::IMPORTANT_NODES_RE.clone(),
            remove_tags_but_retain_content: tag_set(REMOVE_TAGS_BUT_RETAIN_CONTENT),
            retain_tags: tag_set(RETAIN_TAGS),
            retain_tags_top_level: tag_set(RETAIN_TAGS_TOP_LEVEL),
            tags_exempt_from_min_length_check: tag_set(TAGS_EXEMPT_FROM_MIN_LENGTH_CHECK),
            tags_exempt_from_empty_text_check: HashSet::new(),
            attributes_to_retain: tag_set(ATTRIBUTES_TO_RETAIN),
            strip_unlikely_candidates: false,
        }
    }

    /// Text and images preset, an extension of [`Configuration::standard`].
    #[must_use]
    pub fn standard_with_images() -> Self {
        let base = Self::standard();
        Self {
            important_nodes: patterns::IMPORTANT_NODES_WITH_IMAGES_RE.clone(),
            retain_tags: extend(base.retain_tags, IMAGE_TAGS),
            retain_tags_top_level: extend(base.retain_tags_top_level, IMAGE_TAGS),
            tags_exempt_from_min_length_check: extend(
                base.tags_exempt_from_min_length_check,
                IMAGE_TAGS,
            ),
            tags_exempt_from_empty_text_check: extend(
                base.tags_exempt_from_empty_text_check,
                IMAGE_TAGS,
            ),
            attributes_to_retain: extend(base.attributes_to_retain, IMAGE_ATTRIBUTES),
            ..base
        }
    }

    /// Standard preset with JSON overrides applied.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: ConfigurationOverrides = serde_json::from_str(json)?;
        Self::standard().with_overrides(overrides)
    }

    /// Apply overrides on top of this configuration.
    ///
    /// Tag lists replace the current sets; patterns are compiled and
    /// validated.
    pub fn with_overrides(self, overrides: ConfigurationOverrides) -> Result<Self> {
        let ConfigurationOverrides {
            min_length_for_paragraphs,
            positive_classes_and_ids,
            negative_classes_and_ids,
            unlikely_classes_and_ids,
            negative_styles,
            unlikely_styles,
            important_nodes,
            remove_tags_but_retain_content,
            retain_tags,
            retain_tags_top_level,
            tags_exempt_from_min_length_check,
            tags_exempt_from_empty_text_check,
            attributes_to_retain,
            strip_unlikely_candidates,
        } = overrides;

        Ok(Self {
            min_length_for_paragraphs: min_length_for_paragraphs
                .unwrap_or(self.min_length_for_paragraphs),
            positive_classes_and_ids: compile_or(
                positive_classes_and_ids,
                "positive_classes_and_ids",
                self.positive_classes_and_ids,
            )?,
            negative_classes_and_ids: compile_or(
                negative_classes_and_ids,
                "negative_classes_and_ids",
                self.negative_classes_and_ids,
            )?,
            unlikely_classes_and_ids: compile_or(
                unlikely_classes_and_ids,
                "unlikely_classes_and_ids",
                self.unlikely_classes_and_ids,
            )?,
            negative_styles: compile_or(negative_styles, "negative_styles", self.negative_styles)?,
            unlikely_styles: compile_or(unlikely_styles, "unlikely_styles", self.unlikely_styles)?,
            important_nodes: match important_nodes {
                Some(source) => compile_anchored(&source, "important_nodes")?,
                None => self.important_nodes,
            },
            remove_tags_but_retain_content: remove_tags_but_retain_content
                .map_or(self.remove_tags_but_retain_content, owned_set),
            retain_tags: retain_tags.map_or(self.retain_tags, owned_set),
            retain_tags_top_level: retain_tags_top_level
                .map_or(self.retain_tags_top_level, owned_set),
            tags_exempt_from_min_length_check: tags_exempt_from_min_length_check
                .map_or(self.tags_exempt_from_min_length_check, owned_set),
            tags_exempt_from_empty_text_check: tags_exempt_from_empty_text_check
                .map_or(self.tags_exempt_from_empty_text_check, owned_set),
            attributes_to_retain: attributes_to_retain.map_or(self.attributes_to_retain, owned_set),
            strip_unlikely_candidates: strip_unlikely_candidates
                .unwrap_or(self.strip_unlikely_candidates),
        })
    }

    /// The important-node pattern anchored to the whole tag name.
    #[must_use]
    pub fn anchored_important_nodes(&self) -> Regex {
        let source = self.important_nodes.as_str();
        Regex::new(&format!("^(?:{source})$")).unwrap_or_else(|_| self.important_nodes.clone())
    }

    /// Whether `tag` fully matches the important-node pattern.
    ///
    /// Compiles the anchored pattern on every call; [`ScoringEngine`] keeps
    /// its own compiled copy.
    ///
    /// [`ScoringEngine`]: crate::scoring::ScoringEngine
    #[must_use]
    pub fn is_important_node(&self, tag: &str) -> bool {
        self.anchored_important_nodes().is_match(tag)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::standard()
    }
}

/// Partial configuration, deserializable from JSON.
///
/// Every field is optional; absent fields keep the value of the configuration
/// the overrides are applied to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigurationOverrides {
    pub min_length_for_paragraphs: Option<usize>,
    pub positive_classes_and_ids: Option<String>,
    pub negative_classes_and_ids: Option<String>,
    pub unlikely_classes_and_ids: Option<String>,
    pub negative_styles: Option<String>,
    pub unlikely_styles: Option<String>,
    /// Tag alternatives such as `p|div|article`; anchored to the whole tag name.
    pub important_nodes: Option<String>,
    pub remove_tags_but_retain_content: Option<Vec<String>>,
    pub retain_tags: Option<Vec<String>>,
    pub retain_tags_top_level: Option<Vec<String>>,
    pub tags_exempt_from_min_length_check: Option<Vec<String>>,
    pub tags_exempt_from_empty_text_check: Option<Vec<String>>,
    pub attributes_to_retain: Option<Vec<String>>,
    pub strip_unlikely_candidates: Option<bool>,
}

fn tag_set(tags: &[&str]) -> HashSet<String> {
    tags.iter().map(|t| (*t).to_string()).collect()
}

fn extend(mut set: HashSet<String>, extensions: &[&str]) -> HashSet<String> {
    set.extend(extensions.iter().map(|t| (*t).to_string()));
    set
}

fn owned_set(tags: Vec<String>) -> HashSet<String> {
    tags.into_iter().map(|t| t.to_ascii_lowercase()).collect()
}

fn compile_or(source: Option<String>, category: &'static str, current: Regex) -> Result<Regex> {
    match source {
        Some(source) => Regex::new(&source).map_err(|source| Error::InvalidPattern { category, source }),
        None => Ok(current),
    }
}

fn compile_anchored(source: &str, category: &'static str) -> Result<Regex> {
    Regex::new(&format!("^(?:{source})$")).map_err(|source| Error::InvalidPattern { category, source })
}

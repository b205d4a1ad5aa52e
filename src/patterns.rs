//! Compiled regex patterns used by the standard configurations.
//!
//! All patterns are compiled once using `LazyLock`. The raw sources are kept
//! as constants so that overrides can be validated against the same syntax.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class / id patterns
// =============================================================================

/// Class/id names likely to wrap the main content.
pub const POSITIVE_CLASSES_AND_IDS: &str =
    r"(?i)(^(body|content|h?entry|main|page|post|text|blog|story|haupt))|arti(cle|kel)|instapaper_body";

/// Class/id names of navigation, comments, widgets and similar chrome.
pub const NEGATIVE_CLASSES_AND_IDS: &str = r"(?i)nav($|igation)|user|com(ment|bx)|(^com-)|contact|foot|masthead|(me(dia|ta))|outbrain|promo|related|scroll|(sho(utbox|pping))|sidebar|sponsor|tags|tool|widget|player|disclaimer|toc|infobox|vcard|post-ratings";

/// Class/id names that are rarely part of an article body.
pub const UNLIKELY_CLASSES_AND_IDS: &str = r"(?i)com(bx|ment|munity)|dis(qus|cuss)|e(xtra|-?mail)|foot|header|menu|re(mark|ply)|rss|sh(are|outbox)|sponsor|a(d|ll|gegate|rchive|ttachment)|(pag(er|ination))|popup|print|login|si(debar|gn|ngle)";

// =============================================================================
// Style patterns
// =============================================================================

/// Inline styles that usually hide or shrink text.
pub const NEGATIVE_STYLES: &str = r"(?i)hidden|display:\s?none|font-size:\s?small";

/// Inline styles that make an element invisible.
///
/// Case-insensitive and tolerant of whitespace after the colon.
pub const UNLIKELY_STYLES: &str = r"(?i)display:\s*none|visibility:\s*hidden";

// =============================================================================
// Tag patterns
// =============================================================================

/// Tags eligible for the positional prior.
pub const IMPORTANT_NODES: &str = r"^(p|div|td|h1|h2|article|section)$";

/// Same as [`IMPORTANT_NODES`], extended with `img`.
pub const IMPORTANT_NODES_WITH_IMAGES: &str = r"^(p|div|td|h1|h2|article|section|img)$";

pub static POSITIVE_CLASSES_AND_IDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(POSITIVE_CLASSES_AND_IDS).expect("POSITIVE_CLASSES_AND_IDS regex")
});

pub static NEGATIVE_CLASSES_AND_IDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NEGATIVE_CLASSES_AND_IDS).expect("NEGATIVE_CLASSES_AND_IDS regex")
});

pub static UNLIKELY_CLASSES_AND_IDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(UNLIKELY_CLASSES_AND_IDS).expect("UNLIKELY_CLASSES_AND_IDS regex")
});

pub static NEGATIVE_STYLES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NEGATIVE_STYLES).expect("NEGATIVE_STYLES regex"));

pub static UNLIKELY_STYLES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UNLIKELY_STYLES).expect("UNLIKELY_STYLES regex"));

pub static IMPORTANT_NODES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IMPORTANT_NODES).expect("IMPORTANT_NODES regex"));

pub static IMPORTANT_NODES_WITH_IMAGES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(IMPORTANT_NODES_WITH_IMAGES).expect("IMPORTANT_NODES_WITH_IMAGES regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

//! # article-gravity
//!
//! Heuristic extraction of the main article body from an HTML page.
//!
//! Every candidate block element gets a *gravity score*: a positional prior
//! (earlier blocks weigh more) plus a weight computed from class names, ids,
//! inline styles and the amount of paragraph text it holds. The highest
//! scoring element becomes the root of the article, which is then pruned down
//! to paragraphs, headings and (optionally) images.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_gravity::extract;
//!
//! let paragraph = "Plenty of article text that easily passes the minimum paragraph length. ".repeat(3);
//! let html = format!(
//!     r#"<html><body><div class="nav">Home</div><div class="content"><p>{paragraph}</p></div></body></html>"#
//! );
//!
//! let extraction = extract(&html);
//! assert!(extraction.text().starts_with("Plenty of article text"));
//! assert!(!extraction.html().contains("Home"));
//! ```
//!
//! ## Phases
//!
//! - [`preprocess`]: removes scripts, styles and comments
//! - [`scoring`]: computes gravity scores and picks the candidate root
//! - [`images`]: weights the images around the candidate root
//! - [`postprocess`]: sanitizes the root into a detached output document
//!
//! All phases are driven by an immutable [`Configuration`].

mod error;
mod extract;
mod patterns;
mod result;

/// Extraction rules and presets.
pub mod configuration;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Image candidates and their weights.
pub mod images;

/// Cleanup passes applied to the candidate root.
pub mod postprocess;

/// Sanitization before scoring.
pub mod preprocess;

/// Gravity scores and candidate root selection.
pub mod scoring;

// Public API - re-exports
pub use configuration::{Configuration, ConfigurationOverrides, STANDARD, STANDARD_WITH_IMAGES};
pub use error::{Error, Result};
pub use extract::extract_document;
pub use images::ImageCandidate;
pub use result::Extraction;

/// Extracts the article body from an HTML document using the standard
/// (text-only) configuration.
///
/// # Example
///
/// ```rust
/// use article_gravity::extract;
///
/// let extraction = extract("<html><body><nav>menu</nav></body></html>");
/// assert!(extraction.is_empty());
/// ```
#[must_use]
pub fn extract(html: &str) -> Extraction {
    extract_with_configuration(html, &STANDARD)
}

/// Extracts the article body from an HTML document with a custom
/// configuration.
///
/// # Example
///
/// ```rust
/// use article_gravity::{extract_with_configuration, STANDARD_WITH_IMAGES};
///
/// let html = "<html><body><article><p>Short</p></article></body></html>";
/// let extraction = extract_with_configuration(html, &STANDARD_WITH_IMAGES);
/// println!("{}", extraction.html());
/// ```
#[must_use]
pub fn extract_with_configuration(html: &str, config: &Configuration) -> Extraction {
    extract::extract_html(html, config)
}

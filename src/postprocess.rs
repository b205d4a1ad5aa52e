//! Cleans up the candidate root once it has been picked.
//!
//! The passes run in a fixed order, each relying on the state left by the
//! previous one, and the surviving children of the root are finally cloned
//! into a fresh, detached document.
//!
//! Passes that remove nodes while walking take a snapshot of the child list
//! first, or walk it by reverse index.

use std::collections::HashSet;

use log::{debug, trace};

use crate::configuration::Configuration;
use crate::dom::{self, Document, NodeId, NodeRef};
use crate::images::{positive_weight_images, ImageCandidate};
use crate::scoring::GravityScores;

/// Visible separator left where a line break used to be.
pub const LINE_BREAK_SEPARATOR: &str = " • ";

/// Applies the cleanup passes for a configuration.
pub struct Postprocessor<'c> {
    config: &'c Configuration,
}

impl<'c> Postprocessor<'c> {
    #[must_use]
    pub fn new(config: &'c Configuration) -> Self {
        Self { config }
    }

    /// Sanitize the subtree of `root` and return its surviving children as a
    /// new document.
    ///
    /// `images` are the candidates collected for `root`; those with a positive
    /// weight survive score-based pruning. An absent root yields an empty
    /// document.
    #[must_use]
    pub fn postprocess(
        &self,
        root: Option<&NodeRef>,
        images: &[ImageCandidate],
        scores: &GravityScores,
    ) -> Document {
        let Some(root) = root else {
            debug!("postprocess: no candidate root");
            return Document::default();
        };
        debug!("postprocess");

        let protected_images = positive_weight_images(images);
        self.remove_nodes_with_negative_scores(root, scores, &protected_images);
        unwrap_figures(root);
        replace_line_breaks(root);
        self.remove_unlikely_child_nodes(root);
        self.remove_tags_but_retain_content(root);
        self.remove_tags_not_likely_to_be_paragraphs(root);
        self.remove_top_level_tags_not_likely_to_be_paragraphs(root);
        self.remove_short_paragraphs(root);
        self.remove_disallowed_attributes(root);

        dom::clone_into_document(&dom::child_nodes(root))
    }

    /// Pass 1: drop scored elements that scored negative or hold too little
    /// text, unless they are images identified by a positive weight.
    fn remove_nodes_with_negative_scores(
        &self,
        root: &NodeRef,
        scores: &GravityScores,
        protected_images: &HashSet<NodeId>,
    ) {
        for node in dom::descendant_elements(root) {
            if !scores.contains(node.id) || protected_images.contains(&node.id) {
                continue;
            }

            let score = scores.get(node.id);
            let length = dom::char_len(&dom::text(&node));
            if score < 0 || length < self.config.min_length_for_paragraphs {
                log_removal("remove_nodes_with_negative_scores", &node);
                dom::remove(&node);
            }
        }
    }

    /// Pass 4
    fn remove_unlikely_child_nodes(&self, node: &NodeRef) {
        for child in dom::children(node) {
            if self.is_unlikely(&child) {
                log_removal("remove_unlikely_child_nodes", &child);
                dom::remove(&child);
            } else if !dom::children(&child).is_empty() {
                self.remove_unlikely_child_nodes(&child);
            }
        }
    }

    fn is_unlikely(&self, node: &NodeRef) -> bool {
        let class_name = dom::class_name(node);
        let style = dom::get_attribute(node, "style").unwrap_or_default();
        class_name.to_lowercase().contains("caption")
            || self.config.unlikely_styles.is_match(&style)
            || self.config.unlikely_styles.is_match(&class_name)
    }

    /// Pass 5: relabel wrappers to `<p>` instead of unwrapping them, deepest first.
    fn remove_tags_but_retain_content(&self, node: &NodeRef) {
        for child in dom::children(node) {
            self.remove_tags_but_retain_content(&child);
            let is_wrapper = dom::tag_name(&child)
                .is_some_and(|tag| self.config.remove_tags_but_retain_content.contains(&tag));
            if is_wrapper {
                trace!(
                    "remove_tags_but_retain_content: <{}> -> <p>",
                    dom::tag_name(&child).unwrap_or_default()
                );
                dom::rename(&child, "p");
            }
        }
    }

    /// Pass 6
    fn remove_tags_not_likely_to_be_paragraphs(&self, node: &NodeRef) {
        for child in dom::children(node) {
            if !self.is_retained(&child, &self.config.retain_tags) {
                log_removal("remove_tags_not_likely_to_be_paragraphs", &child);
                dom::remove(&child);
            } else if !dom::children(&child).is_empty() {
                self.remove_tags_not_likely_to_be_paragraphs(&child);
            }
        }
    }

    /// Pass 7: inline tags may live inside paragraphs, but not at the top level.
    fn remove_top_level_tags_not_likely_to_be_paragraphs(&self, root: &NodeRef) {
        for child in dom::children(root) {
            if !self.is_retained(&child, &self.config.retain_tags_top_level) {
                log_removal("remove_top_level_tags_not_likely_to_be_paragraphs", &child);
                dom::remove(&child);
            }
        }
    }

    fn is_retained(&self, node: &NodeRef, tags: &HashSet<String>) -> bool {
        dom::tag_name(node).is_some_and(|tag| tags.contains(&tag))
    }

    /// Pass 8: walk the root's child nodes from the end.
    fn remove_short_paragraphs(&self, root: &NodeRef) {
        let nodes = dom::child_nodes(root);
        for node in nodes.iter().rev() {
            if node.is_text() {
                if node.text().trim().is_empty() {
                    dom::remove(node);
                }
                continue;
            }

            let Some(tag) = dom::tag_name(node) else {
                continue;
            };
            let text = dom::text(node);
            let length = dom::char_len(&text);
            let letters = text.chars().filter(|c| c.is_alphabetic()).count();

            let requires_text = !self.config.tags_exempt_from_empty_text_check.contains(&tag);
            let requires_min_length = !self
                .config
                .tags_exempt_from_min_length_check
                .contains(&tag);

            if (requires_text && text.is_empty())
                || (requires_min_length && length < self.config.min_length_for_paragraphs)
                || length > letters * 2
            {
                log_removal("remove_short_paragraphs", node);
                dom::remove(node);
            }
        }
    }

    /// Pass 9
    fn remove_disallowed_attributes(&self, root: &NodeRef) {
        for node in dom::descendant_elements(root) {
            for name in dom::attribute_names(&node) {
                if !self.config.attributes_to_retain.contains(&name) {
                    dom::remove_attribute(&node, &name);
                }
            }
        }
    }
}

/// Pass 2: replace each `figure` with its first image, dropping captions.
fn unwrap_figures(root: &NodeRef) {
    for figure in dom::descendants_by_tag(root, "figure") {
        if let Some(img) = dom::descendants_by_tag(&figure, "img").first() {
            trace!("unwrap_figures: replacing <figure> with its <img>");
            dom::replace_with_node(&figure, img);
        }
    }
}

/// Pass 3: collapse stacked breaks, then turn each break into a separator.
///
/// Two breaks are stacked only when nothing but whitespace separates them.
/// Breaks with text in between each get a separator, so `A<br>B<br>C`
/// becomes `A • B • C` rather than `A • BC`.
fn replace_line_breaks(root: &NodeRef) {
    for br in dom::descendants_by_tag(root, "br") {
        let stacked = dom::previous_significant_sibling(&br).is_some_and(|prev| dom::is_tag(&prev, "br"));
        if stacked {
            dom::remove(&br);
        }
    }

    for br in dom::descendants_by_tag(root, "br") {
        if let Some(prev) = br.prev_sibling() {
            dom::insert_text_after(&prev, LINE_BREAK_SEPARATOR);
        } else if let Some(parent) = br.parent() {
            dom::append_text(&parent, LINE_BREAK_SEPARATOR);
        }
        dom::remove(&br);
    }
}

fn log_removal(pass: &str, node: &NodeRef) {
    trace!(
        "{pass}: removing <{}> {}",
        dom::tag_name(node).unwrap_or_else(|| "#text".to_string()),
        dom::outer_html(node)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringEngine;

    fn first<'a>(doc: &'a Document, selector: &str) -> NodeRef<'a> {
        *doc.select(selector).nodes().first().unwrap()
    }

    fn run(html: &str, config: &Configuration) -> String {
        let doc = dom::parse(html);
        let root = first(&doc, "#root");
        Postprocessor::new(config)
            .postprocess(Some(&root), &[], &GravityScores::new())
            .html()
            .to_string()
    }

    fn paragraph(marker: &str) -> String {
        format!("{marker} is a paragraph with enough words to pass every length check easily.")
    }

    #[test]
    fn test_absent_root_gives_empty_document() {
        let config = Configuration::standard();
        let out = Postprocessor::new(&config).postprocess(None, &[], &GravityScores::new());

        assert!(out.select("*").is_empty());
        assert!(out.html().trim().is_empty());
    }

    #[test]
    fn test_negative_and_short_scored_nodes_are_pruned() {
        let doc = dom::parse(&format!(
            r#"<div id="root"><p id="neg">{}</p><p id="short">tiny</p><p id="good">{}</p><p id="unscored">x</p></div>"#,
            paragraph("NEG"),
            paragraph("GOOD"),
        ));
        let root = first(&doc, "#root");
        let mut scores = GravityScores::new();
        scores.set(first(&doc, "#neg").id, -1);
        scores.set(first(&doc, "#short").id, 10);
        scores.set(first(&doc, "#good").id, 0);

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_nodes_with_negative_scores(&root, &scores, &HashSet::new());

        assert!(doc.select("#neg").is_empty());
        assert!(doc.select("#short").is_empty());
        assert!(doc.select("#good").exists());
        assert!(doc.select("#unscored").exists());
    }

    #[test]
    fn test_positive_images_survive_score_pruning() {
        let doc = dom::parse(r#"<div id="root"><img id="keep" src="a.jpg"><img id="drop" src="b.gif"></div>"#);
        let root = first(&doc, "#root");
        let mut scores = GravityScores::new();
        scores.set(first(&doc, "#keep").id, 100);
        scores.set(first(&doc, "#drop").id, 50);
        let protected: HashSet<NodeId> = [first(&doc, "#keep").id].into_iter().collect();

        let config = Configuration::standard_with_images();
        Postprocessor::new(&config).remove_nodes_with_negative_scores(&root, &scores, &protected);

        assert!(doc.select("#keep").exists());
        assert!(doc.select("#drop").is_empty());
    }

    #[test]
    fn test_figure_is_replaced_by_its_image() {
        let doc = dom::parse(
            r#"<div id="root"><figure><picture><img src="a.jpg"></picture><figcaption>Caption</figcaption></figure><figure><figcaption>none</figcaption></figure></div>"#,
        );
        let root = first(&doc, "#root");

        unwrap_figures(&root);

        assert!(doc.select("#root > img").exists());
        assert_eq!(doc.select("figure").length(), 1);
        assert_eq!(doc.select("figcaption").length(), 1);
    }

    #[test]
    fn test_line_breaks_become_separators() {
        let doc = dom::parse(r#"<div id="root"><p>A</p><br><p>B</p></div>"#);
        let root = first(&doc, "#root");

        replace_line_breaks(&root);

        assert_eq!(root.inner_html().to_string(), "<p>A</p> • <p>B</p>");
    }

    #[test]
    fn test_stacked_line_breaks_collapse() {
        let doc = dom::parse("<div id=\"root\"><p>A<br><br>\n<br>B<br>C</p></div>");
        let root = first(&doc, "#root");

        replace_line_breaks(&root);

        assert!(doc.select("br").is_empty());
        assert_eq!(dom::text(&first(&doc, "p")), "A • B • C");
    }

    #[test]
    fn test_text_between_line_breaks_keeps_both_separators() {
        let doc = dom::parse(r#"<div id="root"><p>A<br>B<br>C</p></div>"#);
        let root = first(&doc, "#root");

        replace_line_breaks(&root);

        assert_eq!(first(&doc, "p").inner_html().to_string(), "A • B • C");
    }

    #[test]
    fn test_leading_line_break_appends_separator_to_parent() {
        let doc = dom::parse(r#"<div id="root"><p><br>text</p></div>"#);
        let root = first(&doc, "#root");

        replace_line_breaks(&root);

        assert_eq!(first(&doc, "p").inner_html().to_string(), "text • ");
    }

    #[test]
    fn test_unlikely_nodes_are_removed() {
        let doc = dom::parse(&format!(
            r#"<div id="root"><p class="Photo-Caption">credit</p><p style="display: none">hidden</p><p class="visibility:hidden">odd</p><p id="keep">{}</p></div>"#,
            paragraph("KEEP")
        ));
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_unlikely_child_nodes(&root);

        assert_eq!(dom::children(&root).len(), 1);
        assert!(doc.select("#keep").exists());
    }

    #[test]
    fn test_wrappers_are_relabelled_to_paragraphs() {
        let doc = dom::parse(r#"<div id="root"><div><span>inner</span><ul><li>item</li></ul></div><blockquote>q</blockquote></div>"#);
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_tags_but_retain_content(&root);

        assert!(doc.select("#root span, #root ul, #root li").is_empty());
        assert_eq!(doc.select("#root p").length(), 4);
        assert!(doc.select("#root > blockquote").exists());
        // The root itself is not relabelled
        assert!(doc.select("div#root").exists());
    }

    #[test]
    fn test_non_paragraph_tags_are_removed() {
        let doc = dom::parse(r#"<div id="root"><p>keep <em>this</em> <form><b>gone</b></form></p><aside>gone</aside></div>"#);
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_tags_not_likely_to_be_paragraphs(&root);

        assert!(doc.select("em").exists());
        assert!(doc.select("form").is_empty());
        assert!(doc.select("aside").is_empty());
    }

    #[test]
    fn test_top_level_inline_tags_are_removed() {
        let doc = dom::parse(r#"<div id="root"><a href="/x">link</a><p>para <a href="/y">inner</a></p><b>bold</b></div>"#);
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_top_level_tags_not_likely_to_be_paragraphs(&root);

        assert_eq!(dom::children(&root).len(), 1);
        assert_eq!(doc.select("a").length(), 1);
    }

    #[test]
    fn test_short_paragraphs_are_removed() {
        let doc = dom::parse(&format!(
            r#"<div id="root"> <p id="short">short</p> text <p id="junk">{junk}</p><h2 id="h">Title</h2><p id="empty"></p><p id="good">{good}</p></div>"#,
            junk = "1234567890 ".repeat(6),
            good = paragraph("GOOD"),
        ));
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_short_paragraphs(&root);

        assert!(doc.select("#short").is_empty());
        assert!(doc.select("#junk").is_empty());
        assert!(doc.select("#empty").is_empty());
        assert!(doc.select("#h").exists());
        assert!(doc.select("#good").exists());
        // Whitespace-only text is gone, other text nodes stay
        assert_eq!(dom::child_nodes(&root).len(), 3);
    }

    #[test]
    fn test_disallowed_attributes_are_stripped() {
        let doc = dom::parse(r#"<div id="root"><p class="x" style="y"><a href="/a" onclick="z" title="t">link</a><img src="i.jpg" alt="i" width="10"></p></div>"#);
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        Postprocessor::new(&config).remove_disallowed_attributes(&root);

        assert!(dom::attribute_names(&first(&doc, "p")).is_empty());
        assert_eq!(dom::attribute_names(&first(&doc, "a")), vec!["href"]);
        let mut img_attributes = dom::attribute_names(&first(&doc, "img"));
        img_attributes.sort();
        assert_eq!(img_attributes, vec!["alt", "src"]);
    }

    #[test]
    fn test_figure_with_image_configuration() {
        let html = r#"<div id="root"><figure><img src="a.jpg"></figure></div>"#;

        let out = run(html, &Configuration::standard_with_images());
        assert_eq!(out, r#"<img src="a.jpg">"#);

        let out = run(html, &Configuration::standard());
        assert!(!out.contains("<img"));
    }

    #[test]
    fn test_output_is_detached_from_source() {
        let doc = dom::parse(&format!(r#"<div id="root"><div class="wrap"><p>{}</p></div></div>"#, paragraph("BODY")));
        let root = first(&doc, "#root");

        let config = Configuration::standard();
        let out = Postprocessor::new(&config).postprocess(Some(&root), &[], &GravityScores::new());

        assert!(out.html().contains("BODY"));
        out.select("p").remove();
        assert!(doc.select("p").exists());
    }

    #[test]
    fn test_postprocess_is_idempotent() {
        let doc = dom::parse(&format!(
            r#"<body><div id="root" class="article"><h2>Heading</h2><div>{a}<br><br>{b}</div><ul><li>{c}</li></ul><p class="caption">c</p><table><tr><td>{d}</td></tr></table><script>x()</script></div></body>"#,
            a = paragraph("A"),
            b = paragraph("B"),
            c = paragraph("C"),
            d = paragraph("D"),
        ));
        let config = Configuration::standard();
        let selection = ScoringEngine::new(&config).select_candidate(&doc);
        let root = first(&doc, "#root");
        let postprocessor = Postprocessor::new(&config);

        let once = postprocessor.postprocess(Some(&root), &[], &selection.scores);
        let once_html = once.html().to_string();
        let twice = postprocessor.postprocess(Some(&once.root()), &[], &GravityScores::new());

        assert!(once_html.contains(" • "));
        assert!(!once_html.contains("class="));
        assert_eq!(twice.html().to_string(), once_html);
    }
}

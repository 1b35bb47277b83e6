//! Metadata derived from a cleaned document body, and its front-matter rendering.

use crate::concepts::{Concept, extract_concepts_with_limit};
use crate::diagrams::{DiagramClassifier, DiagramSuggestion};
use crate::frontmatter::FENCE;
use crate::heading::{Heading, extract_headings};
use crate::pipeline::OptimizeOptions;
use crate::slug::anchor;
use serde::Serialize;

/// One table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading depth (1..=6).
    pub level: u8,
    /// Heading text.
    pub text: String,
    /// Anchor derived from the heading text.
    pub anchor: String,
}

/// Builds the TOC, one entry per heading.
pub fn build_toc(headings: &[Heading]) -> Vec<TocEntry> {
    headings
        .iter()
        .map(|heading| TocEntry {
            level: heading.level,
            text: heading.text.clone(),
            anchor: anchor(&heading.text),
        })
        .collect()
}

/// Rough token count: characters divided by `chars_per_token`.
///
/// This is not a tokenizer; it only gives an order of magnitude.
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> usize {
    text.chars().count() / chars_per_token.max(1)
}

/// Everything written into the generated front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// First H1, the caller's identifier, or the fallback title.
    pub title: String,
    /// Estimated token count of the body.
    pub tokens: usize,
    /// Always true for generated blocks.
    pub optimized_for_llm: bool,
    /// Top concepts, most frequent first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<Concept>,
    /// Table of contents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toc: Vec<TocEntry>,
    /// Sections that could be drawn as diagrams.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggested_diagrams: Vec<DiagramSuggestion>,
}

impl DocumentMetadata {
    /// Derives metadata from a body that no longer carries front-matter.
    pub fn collect(
        body: &str,
        identifier: Option<&str>,
        options: &OptimizeOptions,
        classifier: &DiagramClassifier,
    ) -> Self {
        let lines: Vec<&str> = body.split('\n').collect();
        let headings = extract_headings(&lines);

        let title = headings
            .iter()
            .find(|heading| heading.level == 1)
            .map(|heading| heading.text.clone())
            .or_else(|| {
                identifier
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| options.fallback_title.to_string());

        let mut concepts = extract_concepts_with_limit(body, options.concept_pool);
        concepts.truncate(options.concept_limit);

        let suggested_diagrams = classifier.suggest(&lines, &headings);
        log::debug!(
            "metadata: {} heading(s), {} concept(s), {} diagram suggestion(s)",
            headings.len(),
            concepts.len(),
            suggested_diagrams.len()
        );

        Self {
            title,
            tokens: estimate_tokens(body, options.chars_per_token),
            optimized_for_llm: true,
            concepts,
            toc: build_toc(&headings),
            suggested_diagrams,
        }
    }

    /// Renders the block, including both `---` delimiters.
    ///
    /// Values are written verbatim; quotes or colons inside heading text are
    /// not escaped.
    pub fn render_frontmatter(&self) -> String {
        let mut lines = vec![FENCE.to_string()];
        lines.push(format!("title: \"{}\"", self.title));
        lines.push(format!("tokens: {}", self.tokens));
        lines.push(format!("optimized_for_llm: {}", self.optimized_for_llm));

        if !self.concepts.is_empty() {
            lines.push("concepts:".to_string());
            lines.extend(self.concepts.iter().map(|c| format!("  - {}", c.term)));
        }

        if !self.toc.is_empty() {
            lines.push("toc:".to_string());
            for entry in &self.toc {
                let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                lines.push(format!("{indent}- {}", entry.text));
            }
        }

        if !self.suggested_diagrams.is_empty() {
            lines.push("suggested_diagrams:".to_string());
            for diagram in &self.suggested_diagrams {
                lines.push(format!("  - section: \"{}\"", diagram.heading));
                lines.push(format!("    type: {}", diagram.kind));
            }
        }

        lines.push(FENCE.to_string());
        lines.join("\n")
    }
}

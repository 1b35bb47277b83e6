#![deny(missing_docs)]
//! mdopt core: heading normalization, noise removal, and front-matter synthesis
//! for markdown documents consumed by LLMs.

/// Key-concept extraction heuristics.
pub mod concepts;
/// Diagram-opportunity classification.
pub mod diagrams;
/// Front-matter detection, stripping and YAML parsing.
pub mod frontmatter;
/// Heading extraction.
pub mod heading;
/// Heading hierarchy normalization.
pub mod hierarchy;
/// Generated metadata and its front-matter rendering.
pub mod metadata;
/// Horizontal-rule and blank-line cleanup.
pub mod noise;
/// Pipeline orchestration and options.
pub mod pipeline;
/// TOC anchor generation.
pub mod slug;

pub use concepts::{Concept, extract_concepts};
pub use diagrams::{
    DiagramClassifier, DiagramKind, DiagramSuggestion, KeywordSet, SectionPredicate,
};
pub use frontmatter::{
    FrontmatterError, FrontmatterSpan, FrontmatterSplit, locate_frontmatter, parse_yaml_block,
    split_frontmatter,
};
pub use heading::{Heading, extract_headings};
pub use hierarchy::normalize_hierarchy;
pub use metadata::{DocumentMetadata, TocEntry, estimate_tokens};
pub use noise::remove_noise;
pub use pipeline::{OptimizeOptions, Optimized, Optimizer, TokenStats, optimize_markdown};
pub use slug::anchor;

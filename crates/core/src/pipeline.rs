//! End-to-end optimization: normalize, clean, strip old front-matter, and
//! prepend a freshly generated block.

use crate::concepts::CANDIDATE_POOL;
use crate::diagrams::DiagramClassifier;
use crate::frontmatter::{parse_yaml_block, split_frontmatter};
use crate::hierarchy::normalize_hierarchy;
use crate::metadata::{DocumentMetadata, estimate_tokens};
use crate::noise::remove_noise;

/// Tunables for metadata synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Ranked concept candidates considered before truncation.
    pub concept_pool: usize,
    /// Concepts written into the front-matter. Never more than
    /// `concept_pool` are emitted.
    pub concept_limit: usize,
    /// Characters per token for the token estimate.
    pub chars_per_token: usize,
    /// Title used when there is no H1 and no identifier.
    pub fallback_title: &'static str,
}

impl OptimizeOptions {
    /// Defaults used by the `mdopt` binary.
    pub const fn standard() -> Self {
        Self {
            concept_pool: CANDIDATE_POOL,
            concept_limit: 5,
            chars_per_token: 4,
            fallback_title: "Untitled",
        }
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Token estimates before and after optimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenStats {
    /// Estimate for the input document.
    pub original: usize,
    /// Estimate for the optimized document.
    pub optimized: usize,
}

impl TokenStats {
    /// Signed change from original to optimized.
    pub fn delta(&self) -> i64 {
        self.optimized as i64 - self.original as i64
    }
}

/// Output of a single optimization run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Optimized {
    /// Front-matter, one blank line, then the cleaned body.
    pub document: String,
    /// Metadata rendered into the front-matter.
    pub metadata: DocumentMetadata,
    /// Token estimates for input and output.
    pub stats: TokenStats,
}

/// Runs the optimization pipeline with fixed options and diagram rules.
#[derive(Debug, Default)]
pub struct Optimizer {
    options: OptimizeOptions,
    classifier: DiagramClassifier,
}

impl Optimizer {
    /// Creates an optimizer with the default diagram rules.
    pub fn new(options: OptimizeOptions) -> Self {
        Self {
            options,
            classifier: DiagramClassifier::default(),
        }
    }

    /// Replaces the diagram rules.
    pub fn with_classifier(mut self, classifier: DiagramClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Optimizes `source`. `identifier` is only used as a title fallback.
    pub fn optimize(&self, source: &str, identifier: Option<&str>) -> Optimized {
        let normalized = normalize_hierarchy(source);
        let cleaned = remove_noise(&normalized);

        let split = split_frontmatter(&cleaned);
        if let Some(block) = split.block {
            log_discarded_frontmatter(block);
        }
        let body = trim_leading_blank_lines(split.body);

        let metadata = DocumentMetadata::collect(body, identifier, &self.options, &self.classifier);
        let document = format!("{}\n\n{}", metadata.render_frontmatter(), body);
        let stats = TokenStats {
            original: estimate_tokens(source, self.options.chars_per_token),
            optimized: estimate_tokens(&document, self.options.chars_per_token),
        };
        log::debug!(
            "optimized '{}': ~{} -> ~{} tokens",
            metadata.title,
            stats.original,
            stats.optimized
        );

        Optimized {
            document,
            metadata,
            stats,
        }
    }
}

/// Drops whitespace-only lines at the start so the body follows the
/// generated block after exactly one blank line.
fn trim_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    if rest.trim().is_empty() { "" } else { rest }
}

fn log_discarded_frontmatter(block: &str) {
    match parse_yaml_block(block) {
        Ok(value) => {
            let regenerated = value
                .get("optimized_for_llm")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            if regenerated {
                log::debug!("replacing previously generated front-matter");
            } else {
                let keys: Vec<&str> = value
                    .as_object()
                    .map(|map| map.keys().map(String::as_str).collect())
                    .unwrap_or_default();
                log::debug!("discarding existing front-matter with keys {keys:?}");
            }
        }
        Err(err) => log::warn!("discarding front-matter that is not valid YAML: {err}"),
    }
}

/// Optimizes `source` with default options and returns the new document.
pub fn optimize_markdown(source: &str, identifier: Option<&str>) -> String {
    Optimizer::default().optimize(source, identifier).document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::DiagramKind;

    #[test]
    fn prepends_frontmatter_with_one_blank_line() {
        let out = optimize_markdown("# Title\nbody", None);
        assert!(out.starts_with("---\ntitle: \"Title\"\n"));
        assert!(out.ends_with("---\n\n# Title\nbody"));
    }

    #[test]
    fn metadata_reflects_final_body() {
        let result = Optimizer::default().optimize("# Title\n#### Deep\nText", None);
        let levels: Vec<u8> = result.metadata.toc.iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![1, 2]);
        assert!(result.document.ends_with("# Title\n## Deep\nText"));
        assert!(result.document.contains("toc:\n- Title\n  - Deep\n"));
    }

    #[test]
    fn existing_frontmatter_is_replaced_not_merged() {
        let out = optimize_markdown("---\nauthor: someone\n---\n# Doc\ntext", None);
        assert!(!out.contains("author"));
        assert_eq!(out.matches("---").count(), 2);
    }

    #[test]
    fn invalid_frontmatter_is_still_discarded() {
        let out = optimize_markdown("---\nbad: [oops\n---\n# Doc", None);
        assert!(!out.contains("oops"));
        assert!(out.ends_with("---\n\n# Doc"));
    }

    #[test]
    fn leading_blank_lines_never_widen_the_gap() {
        let out = optimize_markdown(" \n\t\n# Doc", None);
        assert!(out.ends_with("---\n\n# Doc"));
        assert_eq!(optimize_markdown("\n  ", Some("empty")), optimize_markdown("", Some("empty")));
    }

    #[test]
    fn stats_compare_input_and_output() {
        let result = Optimizer::default().optimize("# T\n\n\n\ntext", None);
        assert_eq!(result.stats.original, 2);
        assert_eq!(result.stats.optimized, result.document.chars().count() / 4);
        assert_eq!(result.stats.delta(), result.stats.optimized as i64 - 2);
    }

    #[test]
    fn custom_options_and_rules_are_used() {
        let options = OptimizeOptions {
            concept_limit: 1,
            fallback_title: "Draft",
            ..OptimizeOptions::standard()
        };
        let mut classifier = DiagramClassifier::empty();
        classifier.push_rule("any", DiagramKind::Graph, |_: &str| true);
        let optimizer = Optimizer::new(options).with_classifier(classifier);

        let result = optimizer.optimize("## Alpha Beta Beta\nplain", None);
        assert_eq!(result.metadata.title, "Draft");
        assert_eq!(result.metadata.concepts.len(), 1);
        assert_eq!(result.metadata.concepts[0].term, "Beta");
        assert_eq!(result.metadata.suggested_diagrams[0].kind, DiagramKind::Graph);
    }
}

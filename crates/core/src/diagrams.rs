//! Heuristic detection of sections that would read better as a diagram.
//!
//! A section runs from a heading line up to the next heading (or the end of
//! the document). Its lower-cased text is checked against an ordered list of
//! rules; the first rule that matches decides the diagram type.

use crate::heading::Heading;
use serde::Serialize;
use std::fmt;

/// Kind of diagram suggested for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// Sequential steps or a workflow.
    Flowchart,
    /// Dependencies, hierarchies or connections.
    Graph,
    /// Components, modules or layers of a system.
    Architecture,
}

impl DiagramKind {
    /// Name used in the generated front-matter.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Graph => "graph",
            DiagramKind::Architecture => "architecture",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section that looks like a good diagram candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramSuggestion {
    /// Text of the heading that opens the section.
    pub heading: String,
    /// Suggested diagram type.
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    /// Line index of the heading.
    pub line_index: usize,
}

/// Test applied to the lower-cased text of a section.
pub trait SectionPredicate {
    /// Returns true if the section matches.
    fn matches(&self, section: &str) -> bool;
}

impl<F> SectionPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, section: &str) -> bool {
        (self)(section)
    }
}

/// Matches when any keyword occurs as a substring of the section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from lower-case keywords.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl SectionPredicate for KeywordSet {
    fn matches(&self, section: &str) -> bool {
        self.keywords.iter().any(|kw| section.contains(kw.as_str()))
    }
}

/// Sequential or procedural language.
pub const PROCESS_INDICATORS: &[&str] = &[
    "step 1",
    "step 2",
    "first",
    "then",
    "next",
    "finally",
    "process:",
    "workflow:",
    "procedure:",
];

/// Dependency, hierarchy and connection language.
pub const RELATIONSHIP_INDICATORS: &[&str] = &[
    "depends on",
    "related to",
    "connects to",
    "inherits from",
    "composed of",
    "hierarchy",
    "relationship between",
];

/// Component and system-design language.
pub const ARCHITECTURE_INDICATORS: &[&str] = &[
    "architecture",
    "component",
    "system design",
    "structure",
    "module",
    "layer",
    "interface",
];

/// A named predicate mapped to a diagram kind.
pub struct DiagramRule {
    name: String,
    kind: DiagramKind,
    predicate: Box<dyn SectionPredicate>,
}

impl DiagramRule {
    /// Rule name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind assigned when the rule matches.
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }
}

impl fmt::Debug for DiagramRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramRule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered rule list; earlier rules take priority.
#[derive(Debug)]
pub struct DiagramClassifier {
    rules: Vec<DiagramRule>,
}

impl Default for DiagramClassifier {
    fn default() -> Self {
        let mut classifier = Self::empty();
        classifier.push_rule(
            "process",
            DiagramKind::Flowchart,
            KeywordSet::new(PROCESS_INDICATORS.iter().copied()),
        );
        classifier.push_rule(
            "relationship",
            DiagramKind::Graph,
            KeywordSet::new(RELATIONSHIP_INDICATORS.iter().copied()),
        );
        classifier.push_rule(
            "architecture",
            DiagramKind::Architecture,
            KeywordSet::new(ARCHITECTURE_INDICATORS.iter().copied()),
        );
        classifier
    }
}

impl DiagramClassifier {
    /// Classifier with no rules; never suggests anything.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule with the lowest priority so far.
    pub fn push_rule<P: SectionPredicate + 'static>(
        &mut self,
        name: impl Into<String>,
        kind: DiagramKind,
        predicate: P,
    ) {
        self.rules.push(DiagramRule {
            name: name.into(),
            kind,
            predicate: Box::new(predicate),
        });
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[DiagramRule] {
        &self.rules
    }

    /// Classifies raw section text. The text is lower-cased first.
    pub fn classify(&self, section: &str) -> Option<DiagramKind> {
        let lowered = section.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(&lowered))
            .map(|rule| {
                log::trace!("section matched rule '{}'", rule.name);
                rule.kind
            })
    }

    /// Suggests at most one diagram per heading section.
    ///
    /// `headings` must come from `lines`, in document order. Text before the
    /// first heading is never classified.
    pub fn suggest(&self, lines: &[&str], headings: &[Heading]) -> Vec<DiagramSuggestion> {
        headings
            .iter()
            .enumerate()
            .filter_map(|(position, heading)| {
                let start = heading.line_index;
                let end = headings
                    .get(position + 1)
                    .map_or(lines.len(), |next| next.line_index);
                let section = lines[start..end].join("\n");
                self.classify(&section).map(|kind| DiagramSuggestion {
                    heading: heading.text.clone(),
                    kind,
                    line_index: start,
                })
            })
            .collect()
    }
}

//! Lexical key-concept extraction.
//!
//! Candidates are CamelCase-style identifiers (one or more capitalized word
//! segments glued together) and acronyms. This is a frequency heuristic;
//! proper nouns and code identifiers show up as concepts too.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Number of ranked candidates kept by [`extract_concepts`].
pub const CANDIDATE_POOL: usize = 10;

static CAMEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:[A-Z][a-z]+)*\b").unwrap());
static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());

/// A candidate concept and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    /// The token as it appears in the text.
    pub term: String,
    /// Number of occurrences across both token families.
    pub count: usize,
}

fn is_markup(ch: char) -> bool {
    matches!(ch, '#' | '*' | '`' | '_' | '[' | ']' | '(' | ')')
}

/// Returns the most frequent concepts, up to [`CANDIDATE_POOL`] of them.
pub fn extract_concepts(text: &str) -> Vec<Concept> {
    extract_concepts_with_limit(text, CANDIDATE_POOL)
}

/// Returns up to `limit` concepts, highest count first.
///
/// Ties keep the order in which terms were first collected: all CamelCase
/// matches in text order, followed by all acronym matches in text order.
pub fn extract_concepts_with_limit(text: &str, limit: usize) -> Vec<Concept> {
    let plain: String = text.chars().filter(|ch| !is_markup(*ch)).collect();

    let mut ranked: Vec<Concept> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let tokens = CAMEL_RE
        .find_iter(&plain)
        .chain(ACRONYM_RE.find_iter(&plain))
        .map(|m| m.as_str());

    for token in tokens {
        match positions.get(token) {
            Some(&index) => ranked[index].count += 1,
            None => {
                positions.insert(token, ranked.len());
                ranked.push(Concept {
                    term: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

//! Free-text matching and column-name sanitization
//!
//! The source tables identify concepts by free-text names, so vocabulary
//! membership is case-insensitive substring matching against externally
//! supplied term lists.

/// Case-insensitive substring matcher over a term vocabulary.
///
/// Terms are lowercased once at construction; a candidate matches when its
/// lowercased form contains any term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms_lower: Vec<String>,
}

impl TermMatcher {
    /// Build a matcher from a term list
    #[must_use]
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        Self {
            terms_lower: terms.iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    /// Whether the already-lowercased candidate contains any term
    #[must_use]
    pub fn matches_lower(&self, candidate_lower: &str) -> bool {
        self.terms_lower
            .iter()
            .any(|term| candidate_lower.contains(term.as_str()))
    }

    /// Whether the candidate contains any term, case-insensitively
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.matches_lower(&candidate.to_lowercase())
    }
}

/// Sanitize a lab concept name into a column-safe token.
///
/// Lowercases, maps spaces and slashes to underscores, strips brackets,
/// parentheses and commas, then truncates to `max_len` characters. Distinct
/// concepts can collide after truncation; the feature table rejects the
/// resulting duplicate column instead of silently overwriting it.
#[must_use]
pub fn sanitize_concept_name(name: &str, max_len: usize) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '/' => Some('_'),
            '[' | ']' | '(' | ')' | ',' => None,
            other => Some(other),
        })
        .take(max_len)
        .collect()
}

//! Free-text terms to match patterns.
//!
//! Stores interpret a [`MatchPattern`] as a regular expression searched
//! anywhere inside a string field. In [`MatchMode::Literal`] every piece of
//! user text is escaped first, so `"Se7en (1995)"` only matches that literal
//! text. [`MatchMode::Raw`] passes user text through untouched, which lets
//! callers use pattern syntax but also lets stray metacharacters change what
//! matches.

use std::fmt;

use regex::Regex;

use crate::error::{CatalogError, Result};

/// Separator placed between tokens of a multi-word term.
pub const WHITESPACE_RUN: &str = r"\s+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Escape user text before building patterns.
    #[default]
    Literal,
    /// Use user text as pattern syntax.
    Raw,
}

/// A pattern ready to hand to a document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchPattern(String);

impl MatchPattern {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternNormalizer {
    mode: MatchMode,
}

impl PatternNormalizer {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Pattern matching `keyword` anywhere in a field.
    pub fn substring_pattern(&self, keyword: &str) -> Result<MatchPattern> {
        let pattern = match self.mode {
            MatchMode::Literal => regex::escape(keyword),
            MatchMode::Raw => keyword.to_owned(),
        };
        self.finish(pattern)
    }

    /// Pattern matching the whitespace-separated tokens of `term` in order,
    /// separated by any run of whitespace in the target field.
    ///
    /// `"Tom   Hanks"` becomes `Tom\s+Hanks`, so it also finds `"Tom Hanks"`
    /// and `"Tom\tHanks"`. Leading and trailing whitespace is ignored; a
    /// blank term yields the empty pattern, which matches every string.
    pub fn token_pattern(&self, term: &str) -> Result<MatchPattern> {
        let tokens: Vec<String> = term
            .split_whitespace()
            .map(|token| match self.mode {
                MatchMode::Literal => regex::escape(token),
                MatchMode::Raw => token.to_owned(),
            })
            .collect();
        self.finish(tokens.join(WHITESPACE_RUN))
    }

    fn finish(&self, pattern: String) -> Result<MatchPattern> {
        if self.mode == MatchMode::Raw {
            Regex::new(&pattern).map_err(|err| {
                CatalogError::InvalidPattern(format!("{pattern:?}: {err}"))
            })?;
        }
        Ok(MatchPattern(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &MatchPattern, haystack: &str) -> bool {
        Regex::new(pattern.as_str()).unwrap().is_match(haystack)
    }

    #[test]
    fn tokens_are_joined_by_whitespace_runs() {
        let normalizer = PatternNormalizer::default();
        let pattern = normalizer.token_pattern("Tom Hanks").unwrap();
        assert_eq!(pattern.as_str(), r"Tom\s+Hanks");
    }

    #[test]
    fn irregular_whitespace_in_term_and_field_still_matches() {
        let normalizer = PatternNormalizer::default();
        let pattern = normalizer.token_pattern("  Tom \t  Hanks ").unwrap();
        assert_eq!(pattern.as_str(), r"Tom\s+Hanks");
        assert!(matches(&pattern, "Meg Ryan, Tom   Hanks, Bill Pullman"));
        assert!(matches(&pattern, "Tom\nHanks"));
        assert!(!matches(&pattern, "TomHanks"));
    }

    #[test]
    fn blank_term_matches_everything() {
        let normalizer = PatternNormalizer::default();
        let pattern = normalizer.token_pattern("   ").unwrap();
        assert_eq!(pattern.as_str(), "");
        assert!(matches(&pattern, "anything"));
    }

    #[test]
    fn literal_mode_escapes_metacharacters() {
        let normalizer = PatternNormalizer::new(MatchMode::Literal);

        let keyword = normalizer.substring_pattern("Se7en (1995)").unwrap();
        assert!(matches(&keyword, "Se7en (1995)"));
        assert!(!matches(&keyword, "Se7en 1995"));

        let star = normalizer.token_pattern("Robert Downey Jr.").unwrap();
        assert_eq!(star.as_str(), r"Robert\s+Downey\s+Jr\.");
        assert!(!matches(&star, "Robert Downey Jrx"));
    }

    #[test]
    fn literal_mode_accepts_unbalanced_input() {
        let normalizer = PatternNormalizer::new(MatchMode::Literal);
        let pattern = normalizer.substring_pattern("Star Wars (").unwrap();
        assert!(matches(&pattern, "Star Wars (1977)"));
    }

    #[test]
    fn raw_mode_keeps_pattern_syntax() {
        let normalizer = PatternNormalizer::new(MatchMode::Raw);
        let pattern = normalizer.substring_pattern("^The .*ing$").unwrap();
        assert_eq!(pattern.as_str(), "^The .*ing$");
        assert!(matches(&pattern, "The Shining"));
        assert!(!matches(&pattern, "Shining, The"));
    }

    #[test]
    fn raw_mode_rejects_invalid_patterns() {
        let normalizer = PatternNormalizer::new(MatchMode::Raw);
        let err = normalizer.substring_pattern("Star Wars (").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern(_)));
    }
}

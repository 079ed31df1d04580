use regex::{Regex, RegexBuilder};

use super::error::PatternError;

/// Case sensitivity of a compiled pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchCase {
    #[default]
    Sensitive,
    Insensitive,
}

/// A single compiled `*`/`?` wildcard pattern
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    original: String,
    compiled: Regex,
}

impl WildcardPattern {
    /// Compile a case-sensitive wildcard pattern.
    ///
    /// # Errors
    /// Returns `PatternError::InvalidPattern` if the translated expression fails to compile.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Self::with_case(pattern, MatchCase::Sensitive)
    }

    /// Compile a wildcard pattern with explicit case sensitivity.
    ///
    /// # Errors
    /// Returns `PatternError::InvalidPattern` if the translated expression fails to compile.
    pub fn with_case(pattern: &str, case: MatchCase) -> Result<Self, PatternError> {
        RegexBuilder::new(&translate(pattern))
            .case_insensitive(case == MatchCase::Insensitive)
            .build()
            .map(|compiled| Self {
                original: pattern.to_string(),
                compiled,
            })
            .map_err(|e| PatternError::invalid(pattern, &e.to_string()))
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.compiled.is_match(name)
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// True when the pattern has no wildcards and only matches itself
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self.original.contains(['*', '?'])
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original && self.compiled.as_str() == other.compiled.as_str()
    }
}

impl Eq for WildcardPattern {}

/// Translate a wildcard pattern into an anchored regular expression.
///
/// Literal runs go through `regex::escape`; `*` becomes `.*` and `?` becomes `.`.
/// `(?s)` lets the wildcards match any character.
fn translate(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str(r"(?s)\A");
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push_str(r"\z");
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_prefix_is_case_sensitive() {
        let p = WildcardPattern::compile("CHEM*").unwrap();
        assert!(p.matches("CHEM1"));
        assert!(p.matches("CHEM"));
        assert!(!p.matches("chem1"));
        assert!(!p.matches("xCHEM1"));
    }

    #[test]
    fn test_question_mark_matches_exactly_one() {
        let p = WildcardPattern::compile("cell?.png").unwrap();
        assert!(p.matches("cell1.png"));
        assert!(!p.matches("cell12.png"));
        assert!(!p.matches("cell.png"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let p = WildcardPattern::compile("a.b").unwrap();
        assert!(p.matches("a.b"));
        assert!(!p.matches("axb"));

        let p = WildcardPattern::compile("run (1)+[x]^$|{2}").unwrap();
        assert!(p.matches("run (1)+[x]^$|{2}"));
        assert!(!p.matches("run 1"));
    }

    #[test]
    fn test_literal_pattern_matches_whole_name_only() {
        let p = WildcardPattern::compile("cells").unwrap();
        assert!(p.is_literal());
        assert!(p.matches("cells"));
        assert!(!p.matches("cells_old"));
        assert!(!p.matches("my_cells"));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty_name() {
        let p = WildcardPattern::compile("").unwrap();
        assert!(p.matches(""));
        assert!(!p.matches("a"));
    }

    #[test]
    fn test_star_alone_matches_everything() {
        let p = WildcardPattern::compile("*").unwrap();
        assert!(!p.is_literal());
        assert!(p.matches(""));
        assert!(p.matches("anything at all.jpg"));
    }

    #[test]
    fn test_case_insensitive_mode() {
        let p = WildcardPattern::with_case("*.PNG", MatchCase::Insensitive).unwrap();
        assert!(p.matches("sample.png"));
        assert!(p.matches("sample.Png"));
        assert!(!p.matches("sample.jpg"));
    }

    #[test]
    fn test_translate_escapes_literal_runs() {
        assert_eq!(translate("a*b?"), r"(?s)\Aa.*b.\z");
        assert_eq!(translate("x.y"), r"(?s)\Ax\.y\z");
    }

    #[test]
    fn test_unicode_question_mark_is_one_char() {
        let p = WildcardPattern::compile("z?.jpg").unwrap();
        assert!(p.matches("zé.jpg"));
    }
}

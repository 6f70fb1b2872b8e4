//! Line classification
//!
//! Decides whether a raw export line carries a usable value after the
//! configured prefix, or is noise (wrong prefix, JSON-like, empty).

use regex::Regex;

use crate::pipeline::Discard;

/// Quote characters removed when they enclose an extracted value
const QUOTE_CHARS: [char; 2] = ['"', '\''];

/// Brace-enclosed `"key":` pair, typical of structured export noise
const STRUCTURED_PATTERN: &str = r#"\{\s*"[^"]*"\s*:"#;

/// Prefix-based line classifier
#[derive(Debug, Clone)]
pub struct LineClassifier {
    prefix: String,
    structured: Regex,
}

impl LineClassifier {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            // Constant pattern, always valid
            structured: Regex::new(STRUCTURED_PATTERN).unwrap(),
        }
    }

    /// Extract the candidate value of a line, if any
    #[inline]
    pub fn classify<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.inspect(line).ok()
    }

    /// Extract the candidate value of a line, or the reason it was rejected
    pub fn inspect<'a>(&self, line: &'a str) -> Result<&'a str, Discard> {
        if self.looks_structured(line) {
            return Err(Discard::Structured);
        }

        let Some(pos) = line.find(self.prefix.as_str()) else {
            return Err(Discard::NoPrefix);
        };

        let raw = line[pos + self.prefix.len()..].trim();
        if raw.starts_with("{\"") || raw.starts_with('[') {
            return Err(Discard::Structured);
        }

        let value = strip_quotes(raw);
        if value.is_empty() {
            return Err(Discard::Empty);
        }

        Ok(value)
    }

    /// Heuristic check for JSON objects/arrays
    pub fn looks_structured(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.starts_with('{') || trimmed.starts_with('[') || self.structured.is_match(line)
    }
}

/// Remove one matching pair of enclosing quotes, if present
fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && QUOTE_CHARS.contains(&first) => {
            value[1..value.len() - 1].trim()
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new("Item value:")
    }

    #[test]
    fn test_extracts_value_after_prefix() {
        let c = classifier();
        assert_eq!(c.classify("Item value: hunter2"), Some("hunter2"));
        assert_eq!(c.classify("  Item value:   hunter2  \r\n"), Some("hunter2"));
        assert_eq!(c.classify("Keychain Item value: abc:def"), Some("abc:def"));
    }

    #[test]
    fn test_only_first_prefix_is_split() {
        let c = classifier();
        assert_eq!(c.classify("Item value: Item value: x1"), Some("Item value: x1"));
    }

    #[test]
    fn test_strips_surrounding_quotes() {
        let c = classifier();
        assert_eq!(c.classify(r#"Item value: "quoted pw""#), Some("quoted pw"));
        assert_eq!(c.classify("Item value: 'single'"), Some("single"));
        assert_eq!(c.classify(r#"Item value: "'mixed'""#), Some("'mixed'"));
    }

    #[test]
    fn test_unmatched_quotes_are_kept() {
        let c = classifier();
        assert_eq!(c.classify("Item value: hunter2'"), Some("hunter2'"));
        assert_eq!(c.classify(r#"Item value: "abc""def"#), Some(r#""abc""def"#));
        assert_eq!(c.classify(r#"Item value: 'pw""#), Some(r#"'pw""#));
        assert_eq!(c.classify(r#"Item value: ""#), Some(r#"""#));
    }

    #[test]
    fn test_missing_prefix() {
        assert_eq!(classifier().inspect("Account: a@b.com"), Err(Discard::NoPrefix));
        assert_eq!(classifier().inspect(""), Err(Discard::NoPrefix));
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(classifier().inspect("Item value:   "), Err(Discard::Empty));
        assert_eq!(classifier().inspect(r#"Item value: """#), Err(Discard::Empty));
    }

    #[test]
    fn test_structured_noise() {
        let c = classifier();
        assert_eq!(c.inspect(r#"{"key":"value"}"#), Err(Discard::Structured));
        assert!(c.looks_structured(r#"{"key":"value"}"#));
        assert!(c.looks_structured("  [1, 2, 3]"));
        assert_eq!(c.inspect(r#"Item value: {"a": 1}"#), Err(Discard::Structured));
        assert_eq!(c.inspect("Item value: [1,2]"), Err(Discard::Structured));
        assert_eq!(
            c.inspect(r#"meta {"Item value:": "x"}"#),
            Err(Discard::Structured)
        );
    }

    #[test]
    fn test_braces_inside_password_are_kept() {
        assert_eq!(classifier().classify("Item value: pa{ss}word"), Some("pa{ss}word"));
    }
}

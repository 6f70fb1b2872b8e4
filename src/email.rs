//! Email extraction module
//!
//! Finds email-shaped tokens in export lines and separates them from
//! co-located password values.

use regex::Regex;
use std::borrow::Cow;

/// ASCII `local@domain.tld`, no surrounding whitespace
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}";

/// Pattern-based email extractor
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    pattern: Regex,
    exact: Regex,
    token: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            // Constant pattern, always valid
            pattern: Regex::new(EMAIL_PATTERN).unwrap(),
            exact: Regex::new(&format!("^(?:{})$", EMAIL_PATTERN)).unwrap(),
            token: Regex::new(r"\S+").unwrap(),
        }
    }

    /// First email found in the line, if any
    #[inline]
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern.find(line).map(|m| m.as_str())
    }

    /// Check if the whole (trimmed) value is a single email address
    pub fn is_email(&self, value: &str) -> bool {
        self.exact.is_match(value.trim())
    }

    /// Separate an inline email from a candidate value
    ///
    /// Only a whole whitespace-delimited token counts as an inline email, so
    /// `Summer@Home.de2023` stays a password. Returns the remaining text and
    /// the email. When no email token is present, or nothing would remain
    /// besides it, the candidate is returned untouched.
    pub fn split<'a>(&self, candidate: &'a str) -> (Cow<'a, str>, Option<&'a str>) {
        let Some(m) = self.token.find_iter(candidate).find(|t| self.is_email(t.as_str())) else {
            return (Cow::Borrowed(candidate), None);
        };

        let before = candidate[..m.start()].trim();
        let after = candidate[m.end()..].trim();

        let rest = match (before.is_empty(), after.is_empty()) {
            (true, true) => return (Cow::Borrowed(candidate), None),
            (false, true) => Cow::Borrowed(before),
            (true, false) => Cow::Borrowed(after),
            (false, false) => Cow::Owned(format!("{} {}", before, after)),
        };

        (rest, Some(m.as_str()))
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

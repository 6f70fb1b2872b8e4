//! Length filtering module
//!
//! Accepts or rejects candidate passwords by inclusive length bounds.

/// Inclusive length bounds for candidate passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check if a candidate lies within the configured bounds
    #[inline]
    pub fn accept(&self, candidate: &str) -> bool {
        accept(candidate, self.min, self.max)
    }
}

/// Returns true iff `min <= length(candidate) <= max`
///
/// Length is counted in characters, not bytes. Inverted bounds reject
/// everything.
#[inline]
pub fn accept(candidate: &str, min: usize, max: usize) -> bool {
    let len = char_len(candidate);
    min <= len && len <= max
}

/// Character count with a fast path for ASCII input
#[inline]
pub fn char_len(word: &str) -> usize {
    if word.is_ascii() {
        word.len()
    } else {
        word.chars().count()
    }
}

// Tuning knobs for the matching-block engine.
//
// The only heuristic with a knob is autojunk: in a long second sequence,
// elements that are too common are dropped from the match index.

/// Second sequences shorter than this are never autojunked.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// Occurrence count above which an element of `b` counts as popular.
///
/// An element is popular when it occurs more than `len / 100 + 1` times,
/// i.e. when it takes up more than roughly 1% of the sequence.
pub fn popularity_threshold(len: usize) -> usize {
    len / 100 + 1
}

/// Options for a [`SequenceMatcher`](super::SequenceMatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Treat popular elements of long second sequences as junk.
    pub autojunk: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self { autojunk: true }
    }
}

impl MatcherOptions {
    /// Whether the autojunk heuristic applies to a second sequence of `len`
    /// elements.
    pub fn autojunk_applies(&self, len: usize) -> bool {
        self.autojunk && len >= AUTOJUNK_MIN_LEN
    }
}

// Side-by-side pairing of a line delta.
//
// This module provides:
// - The four-line lookahead that turns a tagged delta into numbered
//   from/to line pairs with in-band change delimiters
// - Optional context windowing that keeps only pairs near a change
//
// Change spans inside a side line are wrapped as
// `MARK_START <key> text MARK_END`, where `<key>` is `+`, `-` or `^`.
// Renderers replace the delimiters with their own markup.

pub mod context;
pub mod lines;

use std::vec;

use crate::differ::{DiffLine, Differ, ndiff};

pub use context::ContextWindow;
pub use lines::Aligned;

/// Opens a change span; followed by the span key.
pub const MARK_START: char = '\u{0}';

/// Closes a change span.
pub const MARK_END: char = '\u{1}';

/// One side of a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideLine {
    /// 1-based line number, or `None` for a placeholder.
    pub number: Option<usize>,
    pub text: String,
}

impl SideLine {
    /// Filler opposite a line with no counterpart.
    pub fn blank() -> Self {
        Self {
            number: None,
            text: "\n".to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.number.is_none()
    }
}

/// Aligned from/to lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePair {
    pub from: SideLine,
    pub to: SideLine,
    /// True unless the line is identical on both sides.
    pub changed: bool,
}

/// Item of a pair stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairEvent {
    Pair(LinePair),
    /// Unchanged lines were skipped here (context mode only).
    Separator,
}

enum Stage<I: Iterator<Item = DiffLine>> {
    Full(Aligned<I>),
    Windowed(ContextWindow<I>),
}

/// Lazily pairs a delta into side-by-side rows.
pub struct PairStream<I: Iterator<Item = DiffLine>> {
    stage: Stage<I>,
}

impl<I: Iterator<Item = DiffLine>> PairStream<I> {
    /// Pair an existing delta. With `context`, only pairs within that many
    /// lines of a change are produced.
    pub fn new(delta: I, context: Option<usize>) -> Self {
        let pairs = Aligned::new(delta);
        let stage = match context {
            Some(context) => Stage::Windowed(ContextWindow::new(pairs, context)),
            None => Stage::Full(pairs),
        };
        Self { stage }
    }
}

impl<I: Iterator<Item = DiffLine>> Iterator for PairStream<I> {
    type Item = PairEvent;

    fn next(&mut self) -> Option<PairEvent> {
        match &mut self.stage {
            Stage::Full(pairs) => pairs.next().map(PairEvent::Pair),
            Stage::Windowed(window) => window.next(),
        }
    }
}

/// Pair the [`ndiff`] delta of two line lists.
///
/// ```
/// use seqdiff::pairs::{mdiff, PairEvent};
///
/// let rows: Vec<_> = mdiff(&["one\n"], &["ore\n"], None).collect();
/// let PairEvent::Pair(row) = &rows[0] else { panic!() };
/// assert_eq!(row.from.text, "o\0^n\u{1}e\n");
/// assert_eq!(row.to.text, "o\0^r\u{1}e\n");
/// assert!(row.changed);
/// ```
pub fn mdiff<A, B>(from: &[A], to: &[B], context: Option<usize>) -> PairStream<vec::IntoIter<DiffLine>>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    PairStream::new(ndiff(from, to).into_iter(), context)
}

/// Like [`mdiff`], with the caller's junk predicates.
pub fn mdiff_with<A, B>(
    differ: &Differ<'_>,
    from: &[A],
    to: &[B],
    context: Option<usize>,
) -> PairStream<vec::IntoIter<DiffLine>>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    PairStream::new(differ.compare(from, to).into_iter(), context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::is_line_junk;

    fn pairs(events: Vec<PairEvent>) -> Vec<LinePair> {
        events
            .into_iter()
            .filter_map(|event| match event {
                PairEvent::Pair(pair) => Some(pair),
                PairEvent::Separator => None,
            })
            .collect()
    }

    #[test]
    fn full_stream_covers_both_inputs() {
        let a = ["one\n", "two\n", "three\n"];
        let b = ["ore\n", "tree\n", "emu\n"];
        let rows = pairs(mdiff(&a, &b, None).collect());

        let from: Vec<_> = rows.iter().filter_map(|r| r.from.number).collect();
        let to: Vec<_> = rows.iter().filter_map(|r| r.to.number).collect();
        assert_eq!(from, vec![1, 2, 3]);
        assert_eq!(to, vec![1, 2, 3]);
        assert!(rows.iter().all(|r| r.changed));
    }

    #[test]
    fn scenario_rows_are_aligned() {
        let a = ["one\n", "two\n", "three\n"];
        let b = ["ore\n", "tree\n", "emu\n"];
        let rows = pairs(mdiff(&a, &b, None).collect());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].from.text, "o\0^n\u{1}e\n");
        assert_eq!(rows[0].to.text, "o\0^r\u{1}e\n");
        assert_eq!(rows[1].from.text, "\0-two\n\u{1}");
        assert!(rows[1].to.is_blank());
        assert_eq!(rows[2].from.text, "t\0-h\u{1}ree\n");
        assert_eq!(rows[2].to.text, "tree\n");
        assert!(rows[3].from.is_blank());
        assert_eq!(rows[3].to.text, "\0+emu\n\u{1}");
        assert_eq!(rows[3].to.number, Some(3));
    }

    #[test]
    fn identical_inputs_window_to_nothing() {
        let a = ["x\n", "y\n"];
        assert_eq!(mdiff(&a, &a, Some(1)).count(), 0);
        assert_eq!(mdiff(&a, &a, None).count(), 2);
    }

    #[test]
    fn custom_differ() {
        let differ = Differ::new().with_linejunk(&is_line_junk);
        let rows = pairs(mdiff_with(&differ, &["a\n", "\n"], &["a\n"], None).collect());
        assert_eq!(rows.len(), 2);
        assert!(rows[1].to.is_blank());
    }
}

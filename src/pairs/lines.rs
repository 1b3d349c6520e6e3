// Tagged-line stream -> aligned (from, to) pairs.
//
// Two stages:
//   - `HalfPairs` looks four lines ahead and classifies them by tag. A fixed
//     table of tag patterns decides whether the front line is emitted alone,
//     together with its counterpart, or with its `?` markers folded in as
//     span delimiters. A running balance of unmatched deletes/inserts decides
//     how many blank placeholders the other side needs, and when.
//   - `Aligned` pairs the half-filled results into full from/to pairs.

use std::collections::VecDeque;

use log::warn;

use super::{LinePair, MARK_END, MARK_START, SideLine};
use crate::differ::{DiffLine, LineTag, Side};

const LOOKAHEAD: usize = 4;

/// Tag of a lookahead slot, or `End` past the last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Peek {
    Equal,
    Delete,
    Insert,
    Hint,
    End,
}

impl From<LineTag> for Peek {
    fn from(tag: LineTag) -> Self {
        match tag {
            LineTag::Equal => Self::Equal,
            LineTag::Delete => Self::Delete,
            LineTag::Insert => Self::Insert,
            LineTag::Hint => Self::Hint,
        }
    }
}

/// How the front line is turned into a side line.
#[derive(Debug, Clone, Copy)]
enum Markup {
    /// Text as-is.
    Plain,
    /// Text with the spans of the following `?` line delimited.
    Hinted,
    /// Whole line delimited as an add (`+`) or delete (`-`).
    Whole(char),
}

/// A pair in which either side may still be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfPair {
    pub from: Option<SideLine>,
    pub to: Option<SideLine>,
    pub changed: bool,
}

/// First stage: the lookahead state machine.
pub struct HalfPairs<I: Iterator<Item = DiffLine>> {
    source: std::iter::Fuse<I>,
    lookahead: VecDeque<DiffLine>,
    /// Last line number handed out on each side.
    numbers: [usize; 2],
    /// Deletes minus inserts not yet balanced by a placeholder.
    blanks_pending: isize,
    ready: VecDeque<HalfPair>,
    done: bool,
}

impl<I: Iterator<Item = DiffLine>> HalfPairs<I> {
    pub fn new(source: I) -> Self {
        Self {
            source: source.fuse(),
            lookahead: VecDeque::with_capacity(LOOKAHEAD),
            numbers: [0, 0],
            blanks_pending: 0,
            ready: VecDeque::new(),
            done: false,
        }
    }

    fn peek(&mut self) -> [Peek; LOOKAHEAD] {
        while self.lookahead.len() < LOOKAHEAD {
            match self.source.next() {
                Some(line) => self.lookahead.push_back(line),
                None => break,
            }
        }
        let mut kinds = [Peek::End; LOOKAHEAD];
        for (slot, line) in kinds.iter_mut().zip(&self.lookahead) {
            *slot = line.tag.into();
        }
        kinds
    }

    fn emit(&mut self, from: Option<SideLine>, to: Option<SideLine>, changed: bool) {
        self.ready.push_back(HalfPair { from, to, changed });
    }

    /// Emit `count` placeholders: positive pads the from side, negative the
    /// to side.
    fn emit_blanks(&mut self, count: isize) {
        for _ in count..0 {
            self.emit(None, Some(SideLine::blank()), true);
        }
        for _ in 0..count {
            self.emit(Some(SideLine::blank()), None, true);
        }
    }

    fn take_line(&mut self, markup: Markup, side: Side) -> SideLine {
        let slot = match side {
            Side::From => 0,
            Side::To => 1,
        };
        self.numbers[slot] += 1;
        let number = Some(self.numbers[slot]);

        let line = self.lookahead.pop_front().map(|l| l.text).unwrap_or_default();
        let text = match markup {
            Markup::Plain => line,
            Markup::Hinted => {
                let hint = self.lookahead.pop_front().map(|l| l.text).unwrap_or_default();
                mark_spans(&line, &change_spans(&hint))
            }
            Markup::Whole(key) => {
                let body = if line.is_empty() { " " } else { line.as_str() };
                format!("{MARK_START}{key}{body}{MARK_END}")
            }
        };
        SideLine { number, text }
    }

    fn step(&mut self) {
        use Peek::{Delete, End, Equal, Hint, Insert};

        match self.peek() {
            [End, ..] => {
                // Give every dangling add/delete its placeholder.
                let count = std::mem::take(&mut self.blanks_pending);
                self.emit_blanks(count);
                self.done = true;
            }
            [Delete, Hint, Insert, Hint] => {
                let from = self.take_line(Markup::Hinted, Side::From);
                let to = self.take_line(Markup::Hinted, Side::To);
                self.emit(Some(from), Some(to), true);
            }
            [Delete, Delete, Insert, Insert] => {
                // An add block follows; do not catch up on blanks yet.
                self.blanks_pending -= 1;
                let from = self.take_line(Markup::Whole('-'), Side::From);
                self.emit(Some(from), None, true);
            }
            [Delete, Delete, Hint, Insert] | [Delete, Delete, Insert, _] | [Delete, Equal, ..] => {
                let from = self.take_line(Markup::Whole('-'), Side::From);
                let count = std::mem::take(&mut self.blanks_pending) - 1;
                self.emit_blanks(count);
                self.emit(Some(from), None, true);
            }
            [Delete, Insert, Hint, _] => {
                let from = self.take_line(Markup::Plain, Side::From);
                let to = self.take_line(Markup::Hinted, Side::To);
                self.emit(Some(from), Some(to), true);
            }
            [Delete, Hint, Insert, _] => {
                let from = self.take_line(Markup::Hinted, Side::From);
                let to = self.take_line(Markup::Plain, Side::To);
                self.emit(Some(from), Some(to), true);
            }
            [Delete, ..] => {
                self.blanks_pending -= 1;
                let from = self.take_line(Markup::Whole('-'), Side::From);
                self.emit(Some(from), None, true);
            }
            [Insert, Delete, Delete, _] => {
                // A delete block follows; do not catch up on blanks yet.
                self.blanks_pending += 1;
                let to = self.take_line(Markup::Whole('+'), Side::To);
                self.emit(None, Some(to), true);
            }
            [Insert, Equal, ..] | [Insert, Delete, ..] => {
                let to = self.take_line(Markup::Whole('+'), Side::To);
                let count = std::mem::take(&mut self.blanks_pending) + 1;
                self.emit_blanks(count);
                self.emit(None, Some(to), true);
            }
            [Insert, ..] => {
                self.blanks_pending += 1;
                let to = self.take_line(Markup::Whole('+'), Side::To);
                self.emit(None, Some(to), true);
            }
            [Equal, ..] => {
                let text = self.lookahead.front().map(|l| l.text.clone()).unwrap_or_default();
                self.numbers[0] += 1;
                let from = SideLine {
                    number: Some(self.numbers[0]),
                    text,
                };
                let to = self.take_line(Markup::Plain, Side::To);
                self.emit(Some(from), Some(to), false);
            }
            [Hint, ..] => {
                if let Some(stray) = self.lookahead.pop_front() {
                    warn!("dropping marker line with no preceding change: {stray}");
                }
            }
        }
    }
}

impl<I: Iterator<Item = DiffLine>> Iterator for HalfPairs<I> {
    type Item = HalfPair;

    fn next(&mut self) -> Option<HalfPair> {
        loop {
            if let Some(pair) = self.ready.pop_front() {
                return Some(pair);
            }
            if self.done {
                return None;
            }
            self.step();
        }
    }
}

/// Runs of `+`, `-` or `^` in a marker line, as `(key, begin, end)` char
/// offsets.
fn change_spans(hint: &str) -> Vec<(char, usize, usize)> {
    let chars: Vec<char> = hint.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let key = chars[i];
        if !matches!(key, '+' | '-' | '^') {
            i += 1;
            continue;
        }
        let begin = i;
        while i < chars.len() && chars[i] == key {
            i += 1;
        }
        spans.push((key, begin, i));
    }
    spans
}

/// Wrap each span of `text` in `MARK_START key ... MARK_END`.
fn mark_spans(text: &str, spans: &[(char, usize, usize)]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + spans.len() * 3);
    let mut pos = 0;
    for &(key, begin, end) in spans {
        let begin = begin.clamp(pos, chars.len());
        let end = end.clamp(begin, chars.len());
        out.extend(&chars[pos..begin]);
        out.push(MARK_START);
        out.push(key);
        out.extend(&chars[begin..end]);
        out.push(MARK_END);
        pos = end;
    }
    out.extend(&chars[pos..]);
    out
}

/// Second stage: match up from-halves with to-halves in order.
pub struct Aligned<I: Iterator<Item = DiffLine>> {
    halves: HalfPairs<I>,
    from: VecDeque<(SideLine, bool)>,
    to: VecDeque<(SideLine, bool)>,
}

impl<I: Iterator<Item = DiffLine>> Aligned<I> {
    pub fn new(source: I) -> Self {
        Self {
            halves: HalfPairs::new(source),
            from: VecDeque::new(),
            to: VecDeque::new(),
        }
    }
}

impl<I: Iterator<Item = DiffLine>> Iterator for Aligned<I> {
    type Item = LinePair;

    fn next(&mut self) -> Option<LinePair> {
        while self.from.is_empty() || self.to.is_empty() {
            let half = self.halves.next()?;
            if let Some(from) = half.from {
                self.from.push_back((from, half.changed));
            }
            if let Some(to) = half.to {
                self.to.push_back((to, half.changed));
            }
        }
        let (from, from_changed) = self.from.pop_front()?;
        let (to, to_changed) = self.to.pop_front()?;
        Some(LinePair {
            from,
            to,
            changed: from_changed || to_changed,
        })
    }
}

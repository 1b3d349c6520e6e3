// Human-readable line differ.
//
// A line-level matcher produces opcodes; equal, delete and insert ranges are
// dumped as tagged lines. Replace ranges look for synchronization pairs:
// lines similar enough that character-level markers are worth showing.
//
// The search walks `b` left to right. For each b[j] it only considers a[i]
// within SYNC_WINDOW of the diagonal and keeps the best one above
// SYNC_CUTOFF, earlier a[i] winning ties. The first b[j] with a candidate is
// synchronized even if a later row would score higher.
// Everything between synchronization pairs is dumped as a plain replace.

pub mod intraline;
pub mod junk;

use std::fmt;

use log::trace;

use crate::matcher::{SequenceMatcher, Tag};

pub use junk::{is_character_junk, is_line_junk};

/// Minimum similarity for a pair of lines to be synchronized.
pub const SYNC_CUTOFF: f64 = 0.74999;

/// How far from the diagonal a synchronization candidate may sit.
pub const SYNC_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// Tagged lines
// ---------------------------------------------------------------------------

/// Leading tag of a line in a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    /// `"  "`: present in both inputs.
    Equal,
    /// `"- "`: only in the first input.
    Delete,
    /// `"+ "`: only in the second input.
    Insert,
    /// `"? "`: intraline markers for the preceding line; never content.
    Hint,
}

impl LineTag {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Equal => "  ",
            Self::Delete => "- ",
            Self::Insert => "+ ",
            Self::Hint => "? ",
        }
    }

    /// Parse a two-character prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "  " => Some(Self::Equal),
            "- " => Some(Self::Delete),
            "+ " => Some(Self::Insert),
            "? " => Some(Self::Hint),
            _ => None,
        }
    }
}

/// One line of a delta: a tag and the line text (line ending included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffLine {
    pub tag: LineTag,
    pub text: String,
}

impl DiffLine {
    pub fn new(tag: LineTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    /// Split a rendered delta line back into tag and text.
    pub fn parse(line: &str) -> Option<Self> {
        let prefix = line.get(..2)?;
        let tag = LineTag::from_prefix(prefix)?;
        Some(Self::new(tag, &line[2..]))
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag.prefix(), self.text)
    }
}

/// Which input of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    From,
    To,
}

// ---------------------------------------------------------------------------
// Differ
// ---------------------------------------------------------------------------

/// Produces tagged, intraline-annotated deltas between two lists of lines.
///
/// Lines should carry their line endings; the delta reproduces them verbatim.
///
/// # Example
/// ```
/// use seqdiff::differ::Differ;
///
/// let a = ["one\n", "two\n", "three\n"];
/// let b = ["ore\n", "tree\n", "emu\n"];
/// let delta: String = Differ::new()
///     .compare(&a, &b)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(
///     delta,
///     "- one\n?  ^\n+ ore\n?  ^\n- two\n- three\n?  -\n+ tree\n+ emu\n"
/// );
/// ```
#[derive(Clone, Copy, Default)]
pub struct Differ<'j> {
    linejunk: Option<&'j dyn Fn(&str) -> bool>,
    charjunk: Option<&'j dyn Fn(&char) -> bool>,
}

impl<'j> Differ<'j> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines matching `linejunk` never seed a line-level match.
    pub fn with_linejunk(mut self, linejunk: &'j dyn Fn(&str) -> bool) -> Self {
        self.linejunk = Some(linejunk);
        self
    }

    /// Characters matching `charjunk` never seed an intraline match.
    pub fn with_charjunk(mut self, charjunk: &'j dyn Fn(&char) -> bool) -> Self {
        self.charjunk = Some(charjunk);
        self
    }

    /// Compare two lists of lines.
    pub fn compare<A, B>(&self, a: &[A], b: &[B]) -> Vec<DiffLine>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let a: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
        let b: Vec<&str> = b.iter().map(AsRef::as_ref).collect();

        let mut cruncher = SequenceMatcher::new(&a, &b);
        if let Some(linejunk) = self.linejunk {
            cruncher = cruncher.with_junk(move |line: &&str| linejunk(*line));
        }

        let mut out = Vec::with_capacity(a.len().max(b.len()));
        for op in cruncher.opcodes() {
            let (alo, ahi, blo, bhi) = (op.i1, op.i2, op.j1, op.j2);
            match op.tag {
                Tag::Replace => self.fancy_replace(&a, alo, ahi, &b, blo, bhi, &mut out),
                Tag::Delete => dump(LineTag::Delete, &a[alo..ahi], &mut out),
                Tag::Insert => dump(LineTag::Insert, &b[blo..bhi], &mut out),
                Tag::Equal => dump(LineTag::Equal, &a[alo..ahi], &mut out),
            }
        }
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn fancy_replace(
        &self,
        a: &[&str],
        alo: usize,
        ahi: usize,
        b: &[&str],
        blo: usize,
        bhi: usize,
        out: &mut Vec<DiffLine>,
    ) {
        let a_chars: Vec<Vec<char>> = a[alo..ahi].iter().map(|l| l.chars().collect()).collect();
        let b_chars: Vec<Vec<char>> = b[blo..bhi].iter().map(|l| l.chars().collect()).collect();

        // One scratch matcher for every candidate pair: `b` changes per row,
        // `a` per candidate, so the char index is rebuilt once per row.
        let mut cruncher: SequenceMatcher<'_, char> = SequenceMatcher::new(&[], &[]);
        if let Some(charjunk) = self.charjunk {
            cruncher = cruncher.with_junk(move |c: &char| charjunk(c));
        }

        let (mut dump_i, mut dump_j) = (alo, blo);
        for j in blo..bhi {
            cruncher.set_seq2(&b_chars[j - blo]);
            let aequiv = alo + (j - blo);
            let lo = aequiv.saturating_sub(SYNC_WINDOW).max(dump_i);
            let hi = (aequiv + SYNC_WINDOW + 1).min(ahi);
            if lo >= hi {
                break;
            }

            let mut best_ratio = SYNC_CUTOFF;
            let mut best_i = None;
            for i in lo..hi {
                cruncher.set_seq1(&a_chars[i - alo]);
                if cruncher.real_quick_ratio() > best_ratio
                    && cruncher.quick_ratio() > best_ratio
                    && cruncher.ratio() > best_ratio
                {
                    best_ratio = cruncher.ratio();
                    best_i = Some(i);
                }
            }
            let Some(best_i) = best_i else {
                continue;
            };
            trace!("synchronizing a[{best_i}] with b[{j}] (ratio {best_ratio:.3})");

            plain_helper(a, dump_i, best_i, b, dump_j, j, out);

            let (aelt, belt) = (a[best_i], b[j]);
            if aelt == belt {
                out.push(DiffLine::new(LineTag::Equal, aelt));
            } else {
                cruncher.set_seqs(&a_chars[best_i - alo], &b_chars[j - blo]);
                let (atags, btags) = intraline::tags(cruncher.opcodes());
                intraline::qformat(aelt, belt, &atags, &btags, out);
            }
            dump_i = best_i + 1;
            dump_j = j + 1;
        }

        plain_helper(a, dump_i, ahi, b, dump_j, bhi, out);
    }
}

fn dump(tag: LineTag, lines: &[&str], out: &mut Vec<DiffLine>) {
    out.extend(lines.iter().map(|line| DiffLine::new(tag, *line)));
}

/// Dump a replace with no synchronization: the shorter side goes first.
fn plain_replace(a: &[&str], b: &[&str], out: &mut Vec<DiffLine>) {
    debug_assert!(!a.is_empty() && !b.is_empty());
    if b.len() < a.len() {
        dump(LineTag::Insert, b, out);
        dump(LineTag::Delete, a, out);
    } else {
        dump(LineTag::Delete, a, out);
        dump(LineTag::Insert, b, out);
    }
}

fn plain_helper(
    a: &[&str],
    alo: usize,
    ahi: usize,
    b: &[&str],
    blo: usize,
    bhi: usize,
    out: &mut Vec<DiffLine>,
) {
    match (alo < ahi, blo < bhi) {
        (true, true) => plain_replace(&a[alo..ahi], &b[blo..bhi], out),
        (true, false) => dump(LineTag::Delete, &a[alo..ahi], out),
        (false, true) => dump(LineTag::Insert, &b[blo..bhi], out),
        (false, false) => {}
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Differ with spaces and tabs as character junk and no line junk.
pub fn ndiff<A, B>(a: &[A], b: &[B]) -> Vec<DiffLine>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    Differ::new().with_charjunk(&is_character_junk).compare(a, b)
}

/// Recover one input from a delta.
///
/// Equal lines belong to both inputs, `-` lines to the first, `+` lines to
/// the second; `?` lines are never content.
pub fn restore(delta: &[DiffLine], side: Side) -> impl Iterator<Item = &str> + '_ {
    let wanted = match side {
        Side::From => LineTag::Delete,
        Side::To => LineTag::Insert,
    };
    delta
        .iter()
        .filter(move |line| line.tag == LineTag::Equal || line.tag == wanted)
        .map(|line| line.text.as_str())
}

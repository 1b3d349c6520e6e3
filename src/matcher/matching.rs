// Longest-matching-block search and its recursive decomposition.
//
// For a rectangle a[alo..ahi) x b[blo..bhi) the search walks `a` left to
// right, keeping a rolling map "b position -> length of the run ending there".
// Each a[i] looks up its positions in `b` (via the index) and extends the run
// that ended at j-1 on the previous row. The best run only changes on a
// strict improvement, so among equally long runs the one with the smallest i,
// then smallest j, wins.
//
// Junk never seeds a run. Once the best junk-free run is known it is grown on
// both ends, first through equal non-junk elements (popular ones included),
// then through equal explicit junk. If the junk-free scan finds nothing at all
// the rectangle is rescanned with every element allowed to seed.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use super::config::MatcherOptions;
use super::index::{BIndex, JunkFn, JunkSet};
use super::opcodes::{self, Opcode};
use crate::error::{DiffError, Result};

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl Match {
    pub const fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }

    /// One past the last matched position in `a`.
    pub const fn a_end(&self) -> usize {
        self.a + self.size
    }

    /// One past the last matched position in `b`.
    pub const fn b_end(&self) -> usize {
        self.b + self.size
    }
}

impl From<(usize, usize, usize)> for Match {
    fn from((a, b, size): (usize, usize, usize)) -> Self {
        Self::new(a, b, size)
    }
}

// ---------------------------------------------------------------------------
// SequenceMatcher
// ---------------------------------------------------------------------------

/// Compares two sequences of hashable elements.
///
/// The matcher owns caches keyed to the current pair: the position index over
/// `b` (rebuilt lazily after [`set_seq2`](Self::set_seq2)), the matching
/// blocks and the opcodes (both dropped by either setter). Replacing only `a`
/// keeps the index, which is what makes comparing many candidates against one
/// fixed `b` cheap.
///
/// A matcher is single-threaded state; use one per comparison.
///
/// # Example
/// ```
/// use seqdiff::matcher::{Match, SequenceMatcher};
///
/// let a: Vec<char> = "abxcd".chars().collect();
/// let b: Vec<char> = "abycd".chars().collect();
/// let mut sm = SequenceMatcher::new(&a, &b);
/// assert_eq!(
///     sm.matching_blocks(),
///     &[Match::new(0, 0, 2), Match::new(3, 3, 2), Match::new(5, 5, 0)]
/// );
/// ```
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    isjunk: Option<Box<JunkFn<'a, T>>>,
    options: MatcherOptions,
    index: BIndex<'a, T>,
    /// Set whenever `b`, the junk predicate or the options change.
    index_stale: bool,
    matching_blocks: Option<Vec<Match>>,
    opcodes: Option<Vec<Opcode>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Matcher with no junk predicate and autojunk enabled.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self {
            a,
            b,
            isjunk: None,
            options: MatcherOptions::default(),
            index: BIndex::empty(),
            index_stale: true,
            matching_blocks: None,
            opcodes: None,
        }
    }

    /// Install a junk predicate: matching elements never seed a match.
    pub fn with_junk<F>(mut self, isjunk: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.isjunk = Some(Box::new(isjunk));
        self.invalidate_index();
        self
    }

    pub fn with_options(mut self, options: MatcherOptions) -> Self {
        self.options = options;
        self.invalidate_index();
        self
    }

    /// Shorthand for `with_options(MatcherOptions { autojunk })`.
    pub fn with_autojunk(self, autojunk: bool) -> Self {
        self.with_options(MatcherOptions { autojunk })
    }

    pub fn a(&self) -> &'a [T] {
        self.a
    }

    pub fn b(&self) -> &'a [T] {
        self.b
    }

    pub fn set_seqs(&mut self, a: &'a [T], b: &'a [T]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replace the first sequence. The index over `b` is kept.
    pub fn set_seq1(&mut self, a: &'a [T]) {
        if std::ptr::eq(a, self.a) {
            return;
        }
        self.a = a;
        self.matching_blocks = None;
        self.opcodes = None;
    }

    /// Replace the second sequence. The index is rebuilt on next use.
    pub fn set_seq2(&mut self, b: &'a [T]) {
        if std::ptr::eq(b, self.b) {
            return;
        }
        self.b = b;
        self.invalidate_index();
    }

    fn invalidate_index(&mut self) {
        self.index_stale = true;
        self.matching_blocks = None;
        self.opcodes = None;
    }

    pub(super) fn index(&mut self) -> &BIndex<'a, T> {
        if self.index_stale {
            self.index = BIndex::build(self.b, self.isjunk.as_deref(), self.options);
            self.index_stale = false;
        }
        &self.index
    }

    /// Junk classification of the current `b` (explicit and popular).
    pub fn junk(&mut self) -> &JunkSet<'a, T> {
        self.index().junk()
    }

    /// Longest matching block in `a[alo..ahi) x b[blo..bhi)`.
    ///
    /// Returns `(alo, blo, 0)` when nothing matches.
    pub fn find_longest_match(
        &mut self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> Result<Match> {
        if alo > ahi || ahi > self.a.len() || blo > bhi || bhi > self.b.len() {
            return Err(DiffError::InvalidRange {
                alo,
                ahi,
                blo,
                bhi,
                len_a: self.a.len(),
                len_b: self.b.len(),
            });
        }
        self.index();
        Ok(self.longest_match(alo, ahi, blo, bhi))
    }

    /// Caller guarantees a valid rectangle and a fresh index.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best = self.scan(alo, ahi, blo, bhi, false);
        if best.size == 0 && !self.index.junk().is_empty() {
            best = self.scan(alo, ahi, blo, bhi, true);
        }
        self.extend(best, alo, ahi, blo, bhi)
    }

    fn scan(&self, alo: usize, ahi: usize, blo: usize, bhi: usize, include_junk: bool) -> Match {
        let (a, index) = (self.a, &self.index);
        let mut best = Match::new(alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();

        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            let positions = if include_junk {
                index.all_positions(elt)
            } else {
                index.seed_positions(elt)
            };
            let start = positions.partition_point(|&j| j < blo);
            for &j in &positions[start..] {
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, k);
                if k > best.size {
                    best = Match::new(i + 1 - k, j + 1 - k, k);
                }
            }
            std::mem::swap(&mut j2len, &mut next_j2len);
            next_j2len.clear();
        }
        best
    }

    fn extend(&self, best: Match, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let junk = self.index.junk();
        let Match {
            a: mut i,
            b: mut j,
            size: mut k,
        } = best;

        for want_junk in [false, true] {
            while i > alo
                && j > blo
                && junk.is_explicit(&b[j - 1]) == want_junk
                && a[i - 1] == b[j - 1]
            {
                i -= 1;
                j -= 1;
                k += 1;
            }
            while i + k < ahi
                && j + k < bhi
                && junk.is_explicit(&b[j + k]) == want_junk
                && a[i + k] == b[j + k]
            {
                k += 1;
            }
        }
        Match::new(i, j, k)
    }

    /// All matching blocks, ascending and non-adjacent, followed by the
    /// sentinel `(len(a), len(b), 0)`.
    pub fn matching_blocks(&mut self) -> &[Match] {
        if self.matching_blocks.is_none() {
            self.index();
            let blocks = self.compute_matching_blocks();
            self.matching_blocks = Some(blocks);
        }
        self.matching_blocks.as_deref().unwrap_or_default()
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut pending = vec![(0, la, 0, lb)];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            found.push(m);
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a_end() < ahi && m.b_end() < bhi {
                pending.push((m.a_end(), ahi, m.b_end(), bhi));
            }
        }
        found.sort_unstable();

        // Blocks found in sibling rectangles can touch; fuse them.
        let mut blocks: Vec<Match> = Vec::with_capacity(found.len() + 1);
        for m in found {
            match blocks.last_mut() {
                Some(last) if last.a_end() == m.a && last.b_end() == m.b => last.size += m.size,
                _ => blocks.push(m),
            }
        }
        blocks.push(Match::new(la, lb, 0));

        debug!(
            "{} matching blocks for sequences of length {la} and {lb}",
            blocks.len() - 1
        );
        blocks
    }

    /// Opcodes turning `a` into `b`, contiguously covering both sequences.
    pub fn opcodes(&mut self) -> &[Opcode] {
        if self.opcodes.is_none() {
            let codes = opcodes::from_blocks(self.matching_blocks());
            debug_assert!(opcodes::check_partition(&codes, self.a.len(), self.b.len()).is_ok());
            self.opcodes = Some(codes);
        }
        self.opcodes.as_deref().unwrap_or_default()
    }

    /// Opcodes split into hunks with at most `n` lines of context.
    pub fn grouped_opcodes(&mut self, n: usize) -> Vec<Vec<Opcode>> {
        let codes = self.opcodes().to_vec();
        opcodes::group(codes, n)
    }
}

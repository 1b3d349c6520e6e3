// Closest-match search over a list of candidate words.
//
// One matcher holds the word as its second sequence so the position index is
// built once; each candidate only replaces the first sequence. Candidates are
// screened with the ratio bounds cheapest first and scored with the exact
// ratio only when every bound clears the cutoff.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{DiffError, Result};
use crate::matcher::SequenceMatcher;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseOptions {
    /// Maximum number of matches returned; must be positive.
    pub n: usize,
    /// Minimum similarity in `[0, 1]`.
    pub cutoff: f64,
}

impl Default for CloseOptions {
    fn default() -> Self {
        Self { n: 3, cutoff: 0.6 }
    }
}

impl CloseOptions {
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(DiffError::InvalidArgument(format!(
                "n must be > 0, got {}",
                self.n
            )));
        }
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(DiffError::InvalidArgument(format!(
                "cutoff must be in [0.0, 1.0], got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Exact ratio of the matcher's pair, or `None` if a bound falls short.
fn score(sm: &mut SequenceMatcher<'_, char>, cutoff: f64) -> Option<f64> {
    if sm.real_quick_ratio() >= cutoff && sm.quick_ratio() >= cutoff {
        let ratio = sm.ratio();
        (ratio >= cutoff).then_some(ratio)
    } else {
        None
    }
}

/// Best score first; equal scores order by candidate, greatest first.
fn rank(x: &(f64, &str), y: &(f64, &str)) -> Ordering {
    y.0.total_cmp(&x.0).then_with(|| y.1.cmp(x.1))
}

fn best<'p>(mut scored: Vec<(f64, &'p str)>, n: usize) -> Vec<&'p str> {
    scored.sort_by(rank);
    scored.truncate(n);
    scored.into_iter().map(|(_, word)| word).collect()
}

/// Up to `opts.n` candidates at least `opts.cutoff` similar to `word`, best
/// first.
///
/// ```
/// use seqdiff::close::{get_close_matches, CloseOptions};
///
/// let found = get_close_matches(
///     "appel",
///     &["ape", "apple", "peach", "puppy"],
///     &CloseOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(found, ["apple", "ape"]);
/// ```
pub fn get_close_matches<'p, S: AsRef<str>>(
    word: &str,
    candidates: &'p [S],
    opts: &CloseOptions,
) -> Result<Vec<&'p str>> {
    opts.validate()?;

    let word_chars: Vec<char> = word.chars().collect();
    let cand_chars: Vec<Vec<char>> = candidates.iter().map(|c| c.as_ref().chars().collect()).collect();

    let mut sm = SequenceMatcher::new(&[], &word_chars);
    let mut scored = Vec::new();
    for (cand, chars) in candidates.iter().zip(&cand_chars) {
        sm.set_seq1(chars);
        if let Some(ratio) = score(&mut sm, opts.cutoff) {
            scored.push((ratio, cand.as_ref()));
        }
    }
    Ok(best(scored, opts.n))
}

/// [`get_close_matches`] with candidates scored across the rayon pool, one
/// matcher per worker.
#[cfg(feature = "parallel")]
pub fn get_close_matches_parallel<'p, S: AsRef<str> + Sync>(
    word: &str,
    candidates: &'p [S],
    opts: &CloseOptions,
) -> Result<Vec<&'p str>> {
    opts.validate()?;

    let word_chars: Vec<char> = word.chars().collect();
    let cand_chars: Vec<Vec<char>> = candidates
        .par_iter()
        .map(|c| c.as_ref().chars().collect())
        .collect();

    let cutoff = opts.cutoff;
    let scored: Vec<(f64, &'p str)> = candidates
        .par_iter()
        .zip(cand_chars.par_iter())
        .map_init(
            || SequenceMatcher::new(&[], &word_chars),
            |sm, (cand, chars)| {
                sm.set_seq1(chars);
                score(sm, cutoff).map(|ratio| (ratio, cand.as_ref()))
            },
        )
        .flatten()
        .collect();
    Ok(best(scored, opts.n))
}

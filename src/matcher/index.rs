// Position index over the second sequence ("b2j").
//
// Maps each distinct element of `b` to its ascending positions. Junk is kept
// as a side set rather than deleted from the map, so a single table serves
// both lookups the matcher needs:
//   - **seed lookups** skip junk elements (explicit or popular),
//   - **fallback lookups** see every element, and are only used when a
//     junk-free scan of a rectangle finds no match at all.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;

use super::config::{MatcherOptions, popularity_threshold};

/// Predicate marking elements that must never seed a match.
pub type JunkFn<'a, T> = dyn Fn(&T) -> bool + 'a;

const NOTHING: &[usize] = &[];

/// Elements of `b` excluded from seeding matches.
#[derive(Debug)]
pub struct JunkSet<'a, T> {
    /// Elements the caller's predicate flagged.
    explicit: HashSet<&'a T>,
    /// Elements the autojunk heuristic flagged as too common.
    popular: HashSet<&'a T>,
}

impl<'a, T: Eq + Hash> JunkSet<'a, T> {
    fn empty() -> Self {
        Self {
            explicit: HashSet::new(),
            popular: HashSet::new(),
        }
    }

    /// True if neither the predicate nor autojunk removed anything.
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.popular.is_empty()
    }

    pub fn is_explicit(&self, elt: &T) -> bool {
        self.explicit.contains(elt)
    }

    pub fn is_popular(&self, elt: &T) -> bool {
        self.popular.contains(elt)
    }

    pub fn contains(&self, elt: &T) -> bool {
        self.is_explicit(elt) || self.is_popular(elt)
    }

    pub fn popular(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.popular.iter().copied()
    }
}

/// Element -> ascending positions in `b`, plus the junk classification.
#[derive(Debug)]
pub struct BIndex<'a, T> {
    positions: HashMap<&'a T, Vec<usize>>,
    junk: JunkSet<'a, T>,
}

impl<'a, T: Eq + Hash> BIndex<'a, T> {
    /// An index over an empty sequence.
    pub fn empty() -> Self {
        Self {
            positions: HashMap::new(),
            junk: JunkSet::empty(),
        }
    }

    /// Index `b`, classifying explicit junk first and then, among the
    /// remaining elements, popular ones.
    pub fn build(b: &'a [T], isjunk: Option<&JunkFn<'_, T>>, opts: MatcherOptions) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            positions.entry(elt).or_default().push(j);
        }

        let mut junk = JunkSet::empty();
        if let Some(isjunk) = isjunk {
            junk.explicit = positions.keys().copied().filter(|&elt| isjunk(elt)).collect();
        }

        if opts.autojunk_applies(b.len()) {
            let ntest = popularity_threshold(b.len());
            junk.popular = positions
                .iter()
                .filter(|(elt, idxs)| idxs.len() > ntest && !junk.explicit.contains(*elt))
                .map(|(elt, _)| *elt)
                .collect();
        }

        debug!(
            "indexed {} elements ({} distinct, {} junk, {} popular)",
            b.len(),
            positions.len(),
            junk.explicit.len(),
            junk.popular.len()
        );

        Self { positions, junk }
    }

    /// Positions usable to seed a match: empty for junk elements.
    #[inline]
    pub fn seed_positions(&self, elt: &T) -> &[usize] {
        if self.junk.contains(elt) {
            return NOTHING;
        }
        self.all_positions(elt)
    }

    /// Every position of `elt` in `b`, junk or not.
    #[inline]
    pub fn all_positions(&self, elt: &T) -> &[usize] {
        self.positions.get(elt).map_or(NOTHING, Vec::as_slice)
    }

    /// Number of occurrences of `elt` in `b`, junk included.
    pub fn count(&self, elt: &T) -> usize {
        self.all_positions(elt).len()
    }

    pub fn junk(&self) -> &JunkSet<'a, T> {
        &self.junk
    }
}

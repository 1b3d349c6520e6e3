// Similarity estimators over a matcher's data.
//
// From cheapest to most expensive, each an upper bound of the next:
//   - `real_quick_ratio`: lengths only,
//   - `quick_ratio`: multiset intersection, ignoring order,
//   - `ratio`: matched elements in the actual matching blocks.
// Callers filtering many candidates check them in that order.

use std::collections::HashMap;
use std::hash::Hash;

use super::matching::SequenceMatcher;

/// `2 * matches / length`, defined as 1.0 when both sequences are empty.
pub fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / length as f64
}

impl<T: Eq + Hash> SequenceMatcher<'_, T> {
    /// Similarity in `[0, 1]` from the matching blocks.
    pub fn ratio(&mut self) -> f64 {
        let length = self.a().len() + self.b().len();
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        calculate_ratio(matches, length)
    }

    /// Upper bound on [`ratio`](Self::ratio) that ignores element order.
    pub fn quick_ratio(&mut self) -> f64 {
        let a = self.a();
        let length = a.len() + self.b().len();
        let index = self.index();

        // Remaining unmatched count in `b` for each element of `a` seen so far.
        let mut avail: HashMap<&T, isize> = HashMap::new();
        let mut matches = 0;
        for elt in a {
            let numb = avail
                .entry(elt)
                .or_insert_with(|| index.count(elt) as isize);
            if *numb > 0 {
                matches += 1;
            }
            *numb -= 1;
        }
        calculate_ratio(matches, length)
    }

    /// Cheapest upper bound on [`ratio`](Self::ratio): lengths only.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a().len(), self.b().len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

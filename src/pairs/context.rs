// Context windowing over aligned pairs.
//
// Unchanged pairs are buffered in a ring of `context + 1`. When a changed pair
// arrives the ring is flushed, preceded by a separator if lines were skipped,
// and then up to `context` trailing pairs pass through. A further change
// within the trailing run restarts the count. Unchanged pairs after the last
// change that fall outside the trailing run are dropped.

use std::collections::VecDeque;

use super::PairEvent;
use super::lines::Aligned;
use crate::differ::DiffLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// Buffering unchanged pairs until a change shows up.
    Collecting,
    /// Passing through pairs after a change; the count left.
    Trailing(usize),
    Done,
}

pub struct ContextWindow<I: Iterator<Item = DiffLine>> {
    pairs: Aligned<I>,
    /// Ring capacity: the context plus the changed pair itself.
    span: usize,
    state: Window,
    out: VecDeque<PairEvent>,
}

impl<I: Iterator<Item = DiffLine>> ContextWindow<I> {
    pub fn new(pairs: Aligned<I>, context: usize) -> Self {
        Self {
            pairs,
            span: context + 1,
            state: Window::Collecting,
            out: VecDeque::new(),
        }
    }

    fn collect(&mut self) {
        let mut ring = VecDeque::with_capacity(self.span);
        let mut seen = 0usize;
        loop {
            let Some(pair) = self.pairs.next() else {
                self.state = Window::Done;
                return;
            };
            if ring.len() == self.span {
                ring.pop_front();
            }
            let changed = pair.changed;
            ring.push_back(pair);
            seen += 1;
            if changed {
                break;
            }
        }

        if seen > self.span {
            self.out.push_back(PairEvent::Separator);
        }
        self.out.extend(ring.into_iter().map(PairEvent::Pair));
        self.state = Window::Trailing(self.span - 1);
    }
}

impl<I: Iterator<Item = DiffLine>> Iterator for ContextWindow<I> {
    type Item = PairEvent;

    fn next(&mut self) -> Option<PairEvent> {
        loop {
            if let Some(event) = self.out.pop_front() {
                return Some(event);
            }
            match self.state {
                Window::Done => return None,
                Window::Collecting => self.collect(),
                Window::Trailing(0) => self.state = Window::Collecting,
                Window::Trailing(remaining) => {
                    let Some(pair) = self.pairs.next() else {
                        self.state = Window::Done;
                        continue;
                    };
                    self.state = Window::Trailing(if pair.changed {
                        self.span - 1
                    } else {
                        remaining - 1
                    });
                    return Some(PairEvent::Pair(pair));
                }
            }
        }
    }
}

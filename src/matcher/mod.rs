// Sequence matching engine.
//
// This module provides:
// - The position index over the second sequence, with junk/autojunk
// - Longest-matching-block search and recursive block decomposition
// - Opcode derivation and context-windowed opcode groups
// - Similarity ratios (exact and two cheap upper bounds)

pub mod config;
pub mod index;
pub mod matching;
pub mod opcodes;
pub mod ratio;

pub use config::MatcherOptions;
pub use index::JunkSet;
pub use matching::{Match, SequenceMatcher};
pub use opcodes::{Opcode, Tag};
pub use ratio::calculate_ratio;

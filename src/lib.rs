//! Seqdiff: sequence comparison and human-readable diffs in Rust.
//!
//! The crate provides:
//! - A longest-matching-block sequence matcher with junk heuristics (`matcher`)
//! - A line differ with intraline change markers (`differ`)
//! - Side-by-side line pairing with optional context windows (`pairs`)
//! - Unified and context diff formatters (`format`)
//! - Closest-match lookup over candidate words (`close`)
//! - Text decoding helpers (`text`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use seqdiff::differ::{ndiff, restore, Side};
//! use seqdiff::matcher::SequenceMatcher;
//!
//! let a: Vec<char> = "private Thread currentThread;".chars().collect();
//! let b: Vec<char> = "private volatile Thread currentThread;".chars().collect();
//! let mut sm = SequenceMatcher::new(&a, &b).with_junk(|c| *c == ' ');
//! assert!(sm.ratio() > 0.86);
//!
//! let old = ["one\n", "two\n", "three\n"];
//! let new = ["ore\n", "tree\n", "emu\n"];
//! let delta = ndiff(&old, &new);
//! assert_eq!(restore(&delta, Side::To).collect::<Vec<_>>(), new);
//! ```

pub mod close;
pub mod differ;
pub mod error;
pub mod format;
pub mod matcher;
pub mod pairs;
pub mod text;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{DiffError, Result};

// Error type shared by every module of the crate.
//
// The engine is pure: a call either completes with a fully valid result or
// fails before producing any output, so there is no partial-result variant.

use thiserror::Error;

/// Errors surfaced by the matcher, the differ and the formatters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A sub-range given to `find_longest_match` is inverted or out of bounds.
    #[error(
        "invalid range a[{alo}..{ahi}] b[{blo}..{bhi}] for sequences of length {len_a} and {len_b}"
    )]
    InvalidRange {
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
        len_a: usize,
        len_b: usize,
    },

    /// A caller-supplied parameter is outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input that is not comparable text (binary data, bad encoding).
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// An opcode tag outside the known set, or an opcode stream that does not
    /// partition both sequences.
    #[error("invalid opcode: {0}")]
    InvalidOpcode(String),
}

pub type Result<T> = std::result::Result<T, DiffError>;

// Opcodes: the edit script derived from matching blocks.
//
// Each opcode relates a half-open range of `a` to a half-open range of `b`.
// Walking the matching blocks left to right, every gap before a block becomes
// a delete, insert or replace, and every block becomes an equal.

use std::fmt;
use std::str::FromStr;

use super::matching::Match;
use crate::error::{DiffError, Result};

/// How a range of `a` relates to a range of `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Insert => "insert",
        }
    }

    /// True if the opcode consumes elements of `a`.
    pub const fn touches_a(self) -> bool {
        !matches!(self, Self::Insert)
    }

    /// True if the opcode consumes elements of `b`.
    pub const fn touches_b(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equal" => Ok(Self::Equal),
            "replace" => Ok(Self::Replace),
            "delete" => Ok(Self::Delete),
            "insert" => Ok(Self::Insert),
            other => Err(DiffError::InvalidOpcode(format!("unknown tag {other:?}"))),
        }
    }
}

/// `a[i1..i2]` relates to `b[j1..j2]` as described by `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub tag: Tag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub const fn new(tag: Tag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self {
            tag,
            i1,
            i2,
            j1,
            j2,
        }
    }

    pub const fn a_len(&self) -> usize {
        self.i2 - self.i1
    }

    pub const fn b_len(&self) -> usize {
        self.j2 - self.j1
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7} a[{}:{}] b[{}:{}]",
            self.tag, self.i1, self.i2, self.j1, self.j2
        )
    }
}

/// Derive opcodes from sorted matching blocks ending in the sentinel.
pub fn from_blocks(blocks: &[Match]) -> Vec<Opcode> {
    let mut codes = Vec::with_capacity(blocks.len() * 2);
    let (mut i, mut j) = (0, 0);
    for m in blocks {
        let tag = match (i < m.a, j < m.b) {
            (true, true) => Some(Tag::Replace),
            (true, false) => Some(Tag::Delete),
            (false, true) => Some(Tag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            codes.push(Opcode::new(tag, i, m.a, j, m.b));
        }
        i = m.a_end();
        j = m.b_end();
        if m.size > 0 {
            codes.push(Opcode::new(Tag::Equal, m.a, i, m.b, j));
        }
    }
    codes
}

/// Split opcodes into hunks separated by more than `2 * n` unchanged
/// elements, keeping at most `n` elements of context on either side of each
/// change.
///
/// Inputs without any change produce no hunks.
pub fn group(mut codes: Vec<Opcode>, n: usize) -> Vec<Vec<Opcode>> {
    if codes.is_empty() {
        codes.push(Opcode::new(Tag::Equal, 0, 1, 0, 1));
    }

    // Trim leading and trailing context.
    if let Some(first) = codes.first_mut().filter(|op| op.tag == Tag::Equal) {
        first.i1 = first.i1.max(first.i2.saturating_sub(n));
        first.j1 = first.j1.max(first.j2.saturating_sub(n));
    }
    if let Some(last) = codes.last_mut().filter(|op| op.tag == Tag::Equal) {
        last.i2 = last.i2.min(last.i1 + n);
        last.j2 = last.j2.min(last.j1 + n);
    }

    let nn = n + n;
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for mut op in codes {
        if op.tag == Tag::Equal && op.a_len() > nn {
            current.push(Opcode::new(
                Tag::Equal,
                op.i1,
                op.i2.min(op.i1 + n),
                op.j1,
                op.j2.min(op.j1 + n),
            ));
            groups.push(std::mem::take(&mut current));
            op.i1 = op.i1.max(op.i2.saturating_sub(n));
            op.j1 = op.j1.max(op.j2.saturating_sub(n));
        }
        current.push(op);
    }
    let only_context = current.len() == 1 && current[0].tag == Tag::Equal;
    if !current.is_empty() && !only_context {
        groups.push(current);
    }
    groups
}

/// Verify that `codes` contiguously partition `[0, len_a) x [0, len_b)` with
/// ranges consistent with their tags.
pub fn check_partition(codes: &[Opcode], len_a: usize, len_b: usize) -> Result<()> {
    let (mut i, mut j) = (0, 0);
    for op in codes {
        if op.i1 != i || op.j1 != j || op.i2 < op.i1 || op.j2 < op.j1 {
            return Err(DiffError::InvalidOpcode(format!(
                "{op} does not continue at a[{i}] b[{j}]"
            )));
        }
        let shape_ok = match op.tag {
            Tag::Equal => op.a_len() == op.b_len() && op.a_len() > 0,
            Tag::Replace => op.a_len() > 0 && op.b_len() > 0,
            Tag::Delete => op.a_len() > 0 && op.b_len() == 0,
            Tag::Insert => op.a_len() == 0 && op.b_len() > 0,
        };
        if !shape_ok {
            return Err(DiffError::InvalidOpcode(format!(
                "{op} has ranges inconsistent with its tag"
            )));
        }
        i = op.i2;
        j = op.j2;
    }
    if i != len_a || j != len_b {
        return Err(DiffError::InvalidOpcode(format!(
            "opcodes end at a[{i}] b[{j}], expected a[{len_a}] b[{len_b}]"
        )));
    }
    Ok(())
}

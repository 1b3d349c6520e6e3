// Intraline annotation for a synchronized pair of lines.
//
// The character-level opcodes of the pair become one tag per character:
// `^` replaced, `-` deleted, `+` inserted, blank when equal. Blank tags that
// sit under a whitespace character take that character instead, so a `?` line
// stays aligned with its text line after tab expansion.

use super::{DiffLine, LineTag};
use crate::matcher::{Opcode, Tag};

/// Build the tag strings for the `a` and `b` lines of a pair.
pub fn tags(codes: &[Opcode]) -> (String, String) {
    let mut atags = String::new();
    let mut btags = String::new();
    for op in codes {
        let (la, lb) = (op.a_len(), op.b_len());
        match op.tag {
            Tag::Replace => {
                atags.extend(std::iter::repeat_n('^', la));
                btags.extend(std::iter::repeat_n('^', lb));
            }
            Tag::Delete => atags.extend(std::iter::repeat_n('-', la)),
            Tag::Insert => btags.extend(std::iter::repeat_n('+', lb)),
            Tag::Equal => {
                atags.extend(std::iter::repeat_n(' ', la));
                btags.extend(std::iter::repeat_n(' ', lb));
            }
        }
    }
    (atags, btags)
}

/// Put the line's own whitespace under blank tags.
pub fn keep_original_ws(line: &str, tags: &str) -> String {
    line.chars()
        .zip(tags.chars())
        .map(|(c, tag)| if tag == ' ' && c.is_whitespace() { c } else { tag })
        .collect()
}

/// Emit `- a`, `? atags`, `+ b`, `? btags`, leaving out a `?` line that
/// carries no marker.
pub fn qformat(aline: &str, bline: &str, atags: &str, btags: &str, out: &mut Vec<DiffLine>) {
    let atags = keep_original_ws(aline, atags);
    let btags = keep_original_ws(bline, btags);
    let (atags, btags) = (atags.trim_end(), btags.trim_end());

    out.push(DiffLine::new(LineTag::Delete, aline));
    if !atags.is_empty() {
        out.push(DiffLine::new(LineTag::Hint, format!("{atags}\n")));
    }
    out.push(DiffLine::new(LineTag::Insert, bline));
    if !btags.is_empty() {
        out.push(DiffLine::new(LineTag::Hint, format!("{btags}\n")));
    }
}

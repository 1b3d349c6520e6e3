// Unified and context diff formatters.
//
// Both walk the grouped opcodes of a line-level match: one hunk per group,
// file headers only when there is at least one hunk. Payload lines are copied
// as-is, so inputs that keep their line endings produce ready-to-print text;
// `line_term` only terminates the header and range lines.

use std::hash::Hash;

use crate::matcher::{Opcode, SequenceMatcher, Tag};

/// Labels and layout shared by both formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub from_file: String,
    pub to_file: String,
    /// Appended to the `from` header after a tab when non-empty.
    pub from_date: String,
    pub to_date: String,
    /// Unchanged lines shown around each change.
    pub context: usize,
    /// Terminator for header and range lines.
    pub line_term: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            from_file: String::new(),
            to_file: String::new(),
            from_date: String::new(),
            to_date: String::new(),
            context: 3,
            line_term: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    fn header(&self, marker: &str, file: &str, date: &str) -> String {
        let term = &self.line_term;
        if date.is_empty() {
            format!("{marker} {file}{term}")
        } else {
            format!("{marker} {file}\t{date}{term}")
        }
    }
}

/// Hunks of a line-level comparison.
fn hunks<T: Eq + Hash>(a: &[T], b: &[T], context: usize) -> Vec<Vec<Opcode>> {
    SequenceMatcher::new(a, b).grouped_opcodes(context)
}

fn as_strs<L: AsRef<str>>(lines: &[L]) -> Vec<&str> {
    lines.iter().map(AsRef::as_ref).collect()
}

/// First and last opcode of a hunk, which `group` never leaves empty.
fn bounds(group: &[Opcode]) -> Option<(&Opcode, &Opcode)> {
    Some((group.first()?, group.last()?))
}

// ---------------------------------------------------------------------------
// Unified format
// ---------------------------------------------------------------------------

/// `start,len` in 1-based terms; a single line is just `start`, an empty
/// range names the line before it.
pub fn unified_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{length}", start + 1),
    }
}

/// Unified diff of two line lists.
///
/// ```
/// use seqdiff::format::{unified_diff, FormatOptions};
///
/// let a = ["one\n", "two\n", "three\n", "four\n"];
/// let b = ["zero\n", "one\n", "tree\n", "four\n"];
/// let opts = FormatOptions {
///     from_file: "Original".into(),
///     to_file: "Current".into(),
///     ..FormatOptions::default()
/// };
/// let text: String = unified_diff(&a, &b, &opts).concat();
/// assert_eq!(
///     text,
///     "--- Original\n+++ Current\n@@ -1,4 +1,4 @@\n\
///      +zero\n one\n-two\n-three\n+tree\n four\n"
/// );
/// ```
pub fn unified_diff<A, B>(a: &[A], b: &[B], opts: &FormatOptions) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let (a, b) = (as_strs(a), as_strs(b));
    let term = &opts.line_term;

    let mut out = Vec::new();
    for group in hunks(&a, &b, opts.context) {
        let Some((first, last)) = bounds(&group) else {
            continue;
        };
        if out.is_empty() {
            out.push(opts.header("---", &opts.from_file, &opts.from_date));
            out.push(opts.header("+++", &opts.to_file, &opts.to_date));
        }
        out.push(format!(
            "@@ -{} +{} @@{term}",
            unified_range(first.i1, last.i2),
            unified_range(first.j1, last.j2)
        ));

        for op in &group {
            if op.tag == Tag::Equal {
                out.extend(a[op.i1..op.i2].iter().map(|line| format!(" {line}")));
                continue;
            }
            if op.tag.touches_a() {
                out.extend(a[op.i1..op.i2].iter().map(|line| format!("-{line}")));
            }
            if op.tag.touches_b() {
                out.extend(b[op.j1..op.j2].iter().map(|line| format!("+{line}")));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Context format
// ---------------------------------------------------------------------------

/// `start,end` in 1-based terms; zero or one lines collapse to one number.
pub fn context_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length <= 1 {
        format!("{beginning}")
    } else {
        format!("{beginning},{}", beginning + length - 1)
    }
}

fn context_prefix(tag: Tag) -> &'static str {
    match tag {
        Tag::Equal => "  ",
        Tag::Replace => "! ",
        Tag::Delete => "- ",
        Tag::Insert => "+ ",
    }
}

/// Context diff of two line lists.
pub fn context_diff<A, B>(a: &[A], b: &[B], opts: &FormatOptions) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let (a, b) = (as_strs(a), as_strs(b));
    let term = &opts.line_term;

    let mut out = Vec::new();
    for group in hunks(&a, &b, opts.context) {
        let Some((first, last)) = bounds(&group) else {
            continue;
        };
        if out.is_empty() {
            out.push(opts.header("***", &opts.from_file, &opts.from_date));
            out.push(opts.header("---", &opts.to_file, &opts.to_date));
        }
        out.push(format!("***************{term}"));

        out.push(format!("*** {} ****{term}", context_range(first.i1, last.i2)));
        if group.iter().any(|op| op.tag == Tag::Replace || op.tag == Tag::Delete) {
            for op in group.iter().filter(|op| op.tag != Tag::Insert) {
                let prefix = context_prefix(op.tag);
                out.extend(a[op.i1..op.i2].iter().map(|line| format!("{prefix}{line}")));
            }
        }

        out.push(format!("--- {} ----{term}", context_range(first.j1, last.j2)));
        if group.iter().any(|op| op.tag == Tag::Replace || op.tag == Tag::Insert) {
            for op in group.iter().filter(|op| op.tag != Tag::Delete) {
                let prefix = context_prefix(op.tag);
                out.extend(b[op.j1..op.j2].iter().map(|line| format!("{prefix}{line}")));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn bare() -> FormatOptions {
        FormatOptions {
            from_file: "Original".into(),
            to_file: "Current".into(),
            line_term: String::new(),
            ..FormatOptions::default()
        }
    }

    #[test]
    fn unified_ranges() {
        assert_eq!(unified_range(3, 3), "3,0");
        assert_eq!(unified_range(0, 0), "0,0");
        assert_eq!(unified_range(3, 4), "4");
        assert_eq!(unified_range(3, 9), "4,6");
    }

    #[test]
    fn context_ranges() {
        assert_eq!(context_range(3, 3), "3");
        assert_eq!(context_range(3, 4), "4");
        assert_eq!(context_range(3, 9), "4,9");
    }

    #[test]
    fn unified_word_hunk() {
        let a = words("one two three four");
        let b = words("zero one tree four");
        assert_eq!(
            unified_diff(&a, &b, &bare()),
            vec![
                "--- Original", "+++ Current", "@@ -1,4 +1,4 @@", "+zero", " one", "-two",
                "-three", "+tree", " four",
            ]
        );
    }

    #[test]
    fn unified_dates_follow_a_tab() {
        let opts = FormatOptions {
            from_date: "2005-01-26 23:30:50".into(),
            to_date: "2010-04-02 10:20:52".into(),
            ..bare()
        };
        let out = unified_diff(&["a"], &["b"], &opts);
        assert_eq!(out[0], "--- Original\t2005-01-26 23:30:50");
        assert_eq!(out[1], "+++ Current\t2010-04-02 10:20:52");
        assert_eq!(out[2], "@@ -1 +1 @@");
    }

    #[test]
    fn equal_inputs_have_no_headers() {
        let a = words("same lines here");
        assert!(unified_diff(&a, &a, &bare()).is_empty());
        assert!(context_diff(&a, &a, &bare()).is_empty());
    }

    #[test]
    fn insertion_into_empty_input() {
        let out = unified_diff::<&str, &str>(&[], &["new"], &bare());
        assert_eq!(out[2], "@@ -0,0 +1 @@");
        assert_eq!(out[3], "+new");
    }

    #[test]
    fn context_word_hunk() {
        let a = words("one two three four");
        let b = words("zero one tree four");
        assert_eq!(
            context_diff(&a, &b, &bare()),
            vec![
                "*** Original", "--- Current", "***************", "*** 1,4 ****", "  one",
                "! two", "! three", "  four", "--- 1,4 ----", "+ zero", "  one", "! tree",
                "  four",
            ]
        );
    }

    #[test]
    fn context_omits_a_side_without_changes() {
        let a = words("a b c");
        let b = words("a b x c");
        let out = context_diff(&a, &b, &bare());
        assert_eq!(
            out,
            vec![
                "*** Original", "--- Current", "***************", "*** 1,3 ****", "--- 1,4 ----",
                "  a", "  b", "+ x", "  c",
            ]
        );
    }

    #[test]
    fn distant_changes_split_into_hunks() {
        let a: Vec<String> = (0..20).map(|i| format!("{i}\n")).collect();
        let mut b = a.clone();
        b[1] = "x\n".into();
        b[18] = "y\n".into();
        let opts = FormatOptions {
            context: 2,
            ..FormatOptions::default()
        };
        let out = unified_diff(&a, &b, &opts);
        let headers: Vec<_> = out.iter().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,4 +1,4 @@\n", "@@ -17,4 +17,4 @@\n"]);
    }
}

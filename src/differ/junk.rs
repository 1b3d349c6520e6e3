// Stock junk predicates for line and character comparisons.

/// A line is junk if it is blank or holds nothing but a single `#`.
///
/// ```
/// use seqdiff::differ::is_line_junk;
///
/// assert!(is_line_junk("\n"));
/// assert!(is_line_junk("  #   \n"));
/// assert!(!is_line_junk("hello\n"));
/// ```
pub fn is_line_junk(line: &str) -> bool {
    matches!(line.trim(), "" | "#")
}

/// Spaces and tabs are junk when matching characters within a line.
pub fn is_character_junk(ch: &char) -> bool {
    matches!(ch, ' ' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_junk() {
        assert!(is_line_junk(""));
        assert!(is_line_junk("   \t\n"));
        assert!(is_line_junk("#"));
        assert!(is_line_junk("\t# \n"));
        assert!(!is_line_junk("##\n"));
        assert!(!is_line_junk("# comment\n"));
    }

    #[test]
    fn character_junk() {
        assert!(is_character_junk(&' '));
        assert!(is_character_junk(&'\t'));
        assert!(!is_character_junk(&'\n'));
        assert!(!is_character_junk(&'x'));
    }
}

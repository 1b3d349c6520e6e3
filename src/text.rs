// Turning raw input bytes into comparable lines.

use crate::error::{DiffError, Result};
use crate::pairs::{MARK_END, MARK_START};

/// Decode `bytes` as UTF-8 text.
///
/// NUL and SOH are rejected because the pair stream uses them to delimit
/// change spans; input containing them is treated as binary.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        DiffError::UnsupportedInput(format!("not valid UTF-8 at byte {}", e.valid_up_to()))
    })?;
    if let Some(pos) = text.find([MARK_START, MARK_END]) {
        return Err(DiffError::UnsupportedInput(format!(
            "control byte 0x{:02x} at byte {pos}",
            bytes[pos]
        )));
    }
    Ok(text.to_string())
}

/// Split after every `\n`, keeping the terminator. A final line without one
/// is kept as-is.
///
/// ```
/// use seqdiff::text::split_lines;
///
/// assert_eq!(split_lines("a\nb\r\nc"), ["a\n", "b\r\n", "c"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

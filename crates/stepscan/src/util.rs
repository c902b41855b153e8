//! Position helpers shared by indexing and the request handlers.
//!
//! Editor positions count columns in UTF-16 code units while Rust strings are
//! indexed by byte, so every position handed out goes through these helpers.

use lsp_types::Position;

/// Calculate UTF-16 code units for a character.
///
/// # Examples
///
/// ```
/// use stepscan::util::utf16_code_units;
///
/// assert_eq!(utf16_code_units('a'), 1);
/// assert_eq!(utf16_code_units('é'), 1);
/// assert_eq!(utf16_code_units('😀'), 2);
/// ```
#[inline]
#[must_use]
pub fn utf16_code_units(ch: char) -> u32 {
    if u32::from(ch) <= 0xFFFF { 1 } else { 2 }
}

/// Length of `text` in UTF-16 code units.
#[must_use]
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(utf16_code_units).sum()
}

/// Convert a byte offset into a 0-based line and UTF-16 column.
///
/// Offsets past the end of `source` map to the end of the text. An offset
/// inside a multi-byte character counts that character as preceding it.
///
/// # Examples
///
/// ```
/// use stepscan::util::byte_offset_to_position;
///
/// let source = "const a = 1;\nGiven('café', fn);";
/// let pos = byte_offset_to_position(source, 20);
/// assert_eq!((pos.line, pos.character), (1, 7));
/// ```
#[must_use]
pub fn byte_offset_to_position(source: &str, byte_offset: usize) -> Position {
    let mut line = 0u32;
    let mut col = 0u32;

    for (index, ch) in source.char_indices() {
        if index >= byte_offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += utf16_code_units(ch);
        }
    }

    Position::new(line, col)
}

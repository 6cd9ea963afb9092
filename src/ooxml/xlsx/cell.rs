//! A1-style cell references.
//!
//! Positions used by the inspector are zero-based `(row, column)` pairs;
//! `A1` is `(0, 0)` and `B8` is `(7, 1)`.

/// Convert a zero-based column index to Excel column letters (0 -> "A", 26 -> "AA").
pub fn column_to_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut col = col + 1;

    while col > 0 {
        col -= 1;
        letters.push((col % 26) as u8 + b'A');
        col /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to a zero-based column index ("A" -> 0, "AA" -> 26).
pub fn letters_to_column(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let number = letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?
            .checked_add((b.to_ascii_uppercase() - b'A') as usize + 1)
    })?;
    Some(number - 1)
}

/// Parse an A1 reference (`"B8"`, `"$B$8"`) into zero-based `(row, column)`.
pub fn parse_reference(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.trim().replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);

    let col = letters_to_column(letters)?;
    let row: usize = digits.parse().ok()?;
    Some((row.checked_sub(1)?, col))
}

/// Format a zero-based position as an A1 reference.
pub fn format_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_to_letters(col), row + 1)
}

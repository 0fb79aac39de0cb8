//! Prize code normalization and generation
//!
//! Codes reach the bot as free text typed or pasted by people: Cyrillic
//! keyboards produce look-alike letters, and copying from chats drags in
//! zero-width characters. Every lookup goes through [`normalize`] so that
//! all those variants resolve to the same stored record.

use crate::core::config::codes::{CHARSET, LENGTH};

/// Maps Cyrillic letters that render like Latin ones to their Latin twin.
///
/// Expects an already uppercased character.
fn fold_homoglyph(c: char) -> Option<char> {
    let latin = match c {
        'А' => 'A',
        'В' => 'B',
        'Е' => 'E',
        'К' => 'K',
        'М' => 'M',
        'Н' => 'H',
        'О' => 'O',
        'Р' => 'P',
        'С' => 'C',
        'Т' => 'T',
        'У' => 'Y',
        'Х' => 'X',
        _ => return None,
    };
    Some(latin)
}

/// Whitespace and format characters that are dropped from the middle of a code.
///
/// Ordinary spaces survive; zero-width characters are not Unicode whitespace
/// but are just as invisible in a chat client, so they go too.
fn is_invisible(c: char) -> bool {
    (c.is_whitespace() && c != ' ') || matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

/// Canonical form of a prize code.
///
/// Uppercases, folds Cyrillic homoglyphs to Latin, strips non-space and
/// zero-width whitespace, then trims the ends. Idempotent.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_uppercase()
        .chars()
        .filter_map(|c| match fold_homoglyph(c) {
            Some(latin) => Some(latin),
            None if is_invisible(c) => None,
            None => Some(c),
        })
        .collect();

    folded.trim().to_string()
}

/// Generates a random code of `length` characters from [`CHARSET`].
///
/// Uses the thread-local CSPRNG with rejection sampling so every
/// character of the alphabet is equally likely.
pub fn generate_code(length: usize) -> String {
    let alphabet = CHARSET.len();
    // Largest multiple of the alphabet size that fits in a byte.
    let limit = (u8::MAX as usize + 1) / alphabet * alphabet;

    let mut code = String::with_capacity(length);
    while code.len() < length {
        let byte = rand::random::<u8>() as usize;
        if byte < limit {
            code.push(CHARSET[byte % alphabet] as char);
        }
    }
    code
}

/// Generates a code of the default length.
pub fn new_code() -> String {
    generate_code(LENGTH)
}

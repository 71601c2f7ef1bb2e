//! Name collation for Hebrew text
//!
//! Final letter forms sort with their regular forms and vowel points are
//! ignored.

use std::cmp::Ordering;

fn fold(c: char) -> Option<char> {
    match c {
        'ך' => Some('כ'),
        'ם' => Some('מ'),
        'ן' => Some('נ'),
        'ף' => Some('פ'),
        'ץ' => Some('צ'),
        // Niqqud and cantillation marks
        '\u{0591}'..='\u{05C7}' => None,
        c => Some(c.to_lowercase().next().unwrap_or(c)),
    }
}

/// Compare two strings by folded letters, falling back to code points
pub fn compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .filter_map(fold)
        .cmp(b.chars().filter_map(fold))
        .then_with(|| a.cmp(b))
}

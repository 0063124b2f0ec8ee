//! Whole-string katakana classification.
//!
//! Every classifier requires a non-empty string whose characters all fall in
//! the relevant block. The empty string is never katakana.

/// Full-width katakana block (U+30A0-U+30FF), including `ー` and `・`.
pub fn is_full_katakana_char(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Half-width katakana (U+FF66-U+FF9F), including the voicing marks `ﾞ` and `ﾟ`.
pub fn is_half_katakana_char(c: char) -> bool {
    ('\u{FF66}'..='\u{FF9F}').contains(&c)
}

/// Check if a string consists only of full-width katakana.
pub fn is_full_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_full_katakana_char)
}

/// Check if a string consists only of half-width katakana.
pub fn is_half_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_half_katakana_char)
}

/// Check if a string consists only of katakana of either width.
///
/// Mixed strings such as `"ヤﾏ"` are accepted.
pub fn is_katakana(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| is_full_katakana_char(c) || is_half_katakana_char(c))
}

pub mod classify;
pub mod kana;
pub mod validate;

pub use classify::{is_full_katakana, is_half_katakana, is_katakana};
pub use kana::{half_to_full_katakana, hiragana_to_katakana, normalize_to_katakana};
pub use validate::{
    KatakanaValidation, ValidationError, ValidationOptions, trim_value, validate_katakana,
};

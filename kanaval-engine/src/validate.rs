//! Validation of name-kana (名前カナ) input.
//!
//! [`validate_katakana`] never fails: every rejection is reported through
//! [`KatakanaValidation::error_message`] so that form handlers can show the
//! message next to the field.

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::classify::{is_full_katakana, is_katakana};
use crate::kana::{half_to_full_katakana, normalize_to_katakana};

/// Reasons a value is rejected. `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    #[error("名前カナは必須です")]
    Required,

    #[error("カタカナで入力してください")]
    NotKatakana,

    #[error("全角カタカナで入力してください")]
    NotFullWidth,
}

impl ValidationError {
    /// Stable machine-readable identifier.
    pub fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NotKatakana => "not_katakana",
            Self::NotFullWidth => "not_full_width",
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validation policy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Accept half-width katakana as-is
    #[serde(alias = "allowHalfWidth")]
    pub allow_half_width: bool,
    /// Convert hiragana / half-width input instead of rejecting it
    #[serde(alias = "autoNormalize")]
    pub auto_normalize: bool,
}

impl ValidationOptions {
    pub fn with_half_width(mut self, allow: bool) -> Self {
        self.allow_half_width = allow;
        self
    }

    pub fn with_auto_normalize(mut self, enabled: bool) -> Self {
        self.auto_normalize = enabled;
        self
    }
}

/// Outcome of [`validate_katakana`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KatakanaValidation {
    pub is_valid: bool,
    pub is_katakana: bool,
    pub is_full_width: bool,
    /// Converted text, present only when the input had to be normalized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<ValidationError>,
}

impl KatakanaValidation {
    fn valid(is_full_width: bool, normalized_text: Option<String>) -> Self {
        Self {
            is_valid: true,
            is_katakana: true,
            is_full_width,
            normalized_text,
            error_message: None,
        }
    }

    fn invalid(is_katakana: bool, error: ValidationError) -> Self {
        Self {
            is_valid: false,
            is_katakana,
            is_full_width: false,
            normalized_text: None,
            error_message: Some(error),
        }
    }

    /// `Err` with the rejection reason when the value is invalid.
    pub fn into_result(self) -> Result<Self, ValidationError> {
        match self.error_message {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Whitespace stripped around a value: ECMAScript WhiteSpace plus
/// LineTerminator. Unlike Unicode White_Space this includes U+FEFF (BOM)
/// and excludes U+0085 (NEL).
fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Strip surrounding whitespace the way form input is trimmed, including the
/// ideographic space and a byte order mark.
pub fn trim_value(text: &str) -> &str {
    text.trim_matches(is_trimmable)
}

/// Validate a name-kana value.
///
/// `None` stands for a missing value and is treated like an empty string.
/// Leading and trailing whitespace is ignored, see [`trim_value`]. The checks
/// run in order and the first that applies decides:
///
/// 1. missing or blank → [`ValidationError::Required`]
/// 2. not katakana → normalized when `auto_normalize` succeeds, otherwise
///    [`ValidationError::NotKatakana`]
/// 3. contains half-width katakana while `allow_half_width` is off → widened
///    when `auto_normalize` is on, otherwise [`ValidationError::NotFullWidth`]
/// 4. valid as-is
pub fn validate_katakana(text: Option<&str>, options: &ValidationOptions) -> KatakanaValidation {
    let trimmed = text.map(trim_value).unwrap_or_default();
    if trimmed.is_empty() {
        debug!("rejecting name kana: empty");
        return KatakanaValidation::invalid(false, ValidationError::Required);
    }

    if !is_katakana(trimmed) {
        if options.auto_normalize {
            let normalized = normalize_to_katakana(trimmed);
            if is_katakana(&normalized) {
                let full = is_full_katakana(&normalized);
                return KatakanaValidation::valid(full, Some(normalized));
            }
        }
        debug!("rejecting name kana {:?}: not katakana", trimmed);
        return KatakanaValidation::invalid(false, ValidationError::NotKatakana);
    }

    let full_width = is_full_katakana(trimmed);
    if !full_width && !options.allow_half_width {
        if options.auto_normalize {
            return KatakanaValidation::valid(true, Some(half_to_full_katakana(trimmed)));
        }
        debug!("rejecting name kana {:?}: half-width", trimmed);
        return KatakanaValidation::invalid(true, ValidationError::NotFullWidth);
    }

    KatakanaValidation::valid(full_width, None)
}

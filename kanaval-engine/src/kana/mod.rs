mod halfwidth;

pub use halfwidth::{DAKUTEN, HANDAKUTEN};

/// Convert hiragana to katakana
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            // Hiragana range (U+3041-U+3096) -> Katakana (U+30A1-U+30F6)
            '\u{3041}'..='\u{3096}' => std::char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Convert half-width katakana to full-width katakana.
///
/// A voicing mark is merged into the preceding letter only when that letter
/// has a voiced (`ﾞ`) or semi-voiced (`ﾟ`) form, e.g. `ｶﾞ` → `ガ`, `ﾊﾟ` → `パ`.
/// Any other mark, including one at the start of the string, is emitted as-is.
/// Characters outside the half-width block pass through unchanged.
pub fn half_to_full_katakana(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let composed = match chars.peek() {
            Some(&DAKUTEN) => halfwidth::voiced(c),
            Some(&HANDAKUTEN) => halfwidth::semi_voiced(c),
            _ => None,
        };
        if let Some(full) = composed {
            out.push(full);
            chars.next(); // consume mark
            continue;
        }

        out.push(halfwidth::basic(c).unwrap_or(c));
    }

    out
}

/// Normalize Japanese text towards full-width katakana.
///
/// Hiragana is converted first, then half-width katakana is widened.
pub fn normalize_to_katakana(text: &str) -> String {
    half_to_full_katakana(&hiragana_to_katakana(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("やまだたろう"), "ヤマダタロウ");
        assert_eq!(hiragana_to_katakana("あきこ"), "アキコ");
        assert_eq!(hiragana_to_katakana("がぎぐげご"), "ガギグゲゴ");
        assert_eq!(hiragana_to_katakana("ぱぴぷぺぽ"), "パピプペポ");
        assert_eq!(hiragana_to_katakana("きゃきゅきょ"), "キャキュキョ");
        assert_eq!(hiragana_to_katakana("ゔ"), "ヴ");

        // Already katakana, or not kana at all
        assert_eq!(hiragana_to_katakana("ヤマダタロウ"), "ヤマダタロウ");
        assert_eq!(hiragana_to_katakana("あいうabc"), "アイウabc");
        assert_eq!(hiragana_to_katakana("山田"), "山田");
    }

    #[test]
    fn test_hiragana_range_edges() {
        // ゗ (U+3097) and ゝ (U+309D) are outside the converted range
        assert_eq!(hiragana_to_katakana("\u{3041}\u{3096}"), "\u{30A1}\u{30F6}");
        assert_eq!(hiragana_to_katakana("\u{3040}\u{3097}ゝ"), "\u{3040}\u{3097}ゝ");
    }

    #[test]
    fn test_hiragana_to_katakana_preserves_length() {
        for s in ["", "あ", "らーめん", "がっこう123", "ﾔﾏﾀﾞ"] {
            assert_eq!(hiragana_to_katakana(s).chars().count(), s.chars().count());
        }
    }

    #[test]
    fn test_half_to_full_basic() {
        assert_eq!(half_to_full_katakana("ﾔﾏﾀﾞﾀﾛｳ"), "ヤマダタロウ");
        assert_eq!(half_to_full_katakana("ｱｷｺ"), "アキコ");
        assert_eq!(half_to_full_katakana("ｯｬｭｮｰｦﾝ"), "ッャュョーヲン");
    }

    #[test]
    fn test_half_to_full_voiced() {
        assert_eq!(half_to_full_katakana("ｶﾞｷﾞｸﾞｹﾞｺﾞ"), "ガギグゲゴ");
        assert_eq!(half_to_full_katakana("ｻﾞｼﾞｽﾞｾﾞｿﾞ"), "ザジズゼゾ");
        assert_eq!(half_to_full_katakana("ﾀﾞﾁﾞﾂﾞﾃﾞﾄﾞ"), "ダヂヅデド");
        assert_eq!(half_to_full_katakana("ﾊﾞﾋﾞﾌﾞﾍﾞﾎﾞ"), "バビブベボ");
    }

    #[test]
    fn test_half_to_full_semi_voiced() {
        assert_eq!(half_to_full_katakana("ﾊﾟﾋﾟﾌﾟﾍﾟﾎﾟ"), "パピプペポ");
    }

    #[test]
    fn test_orphan_marks_pass_through() {
        // Leading mark
        assert_eq!(half_to_full_katakana("ﾞｱ"), "ﾞア");
        // Mark after a letter without that voicing
        assert_eq!(half_to_full_katakana("ｱﾞ"), "アﾞ");
        assert_eq!(half_to_full_katakana("ｶﾟ"), "カﾟ");
        // ｳﾞ has no entry in the voiced table
        assert_eq!(half_to_full_katakana("ｳﾞ"), "ウﾞ");
        // Mark after a full-width letter is not merged
        assert_eq!(half_to_full_katakana("カﾞ"), "カﾞ");
        // Doubled mark: only the first is consumed
        assert_eq!(half_to_full_katakana("ｶﾞﾞ"), "ガﾞ");
    }

    #[test]
    fn test_half_to_full_identity_without_half_width() {
        for s in ["", "ヤマダタロウ", "山田太郎", "やまだ", "Yamada Taro", "ガ・パ"] {
            assert_eq!(half_to_full_katakana(s), s);
        }
    }

    #[test]
    fn test_half_to_full_never_grows() {
        for s in ["ｶﾞｶﾞ", "ﾊﾟﾊﾞﾊ", "ﾞﾟ", "abcｱ"] {
            assert!(half_to_full_katakana(s).chars().count() <= s.chars().count());
        }
    }

    #[test]
    fn test_normalize_to_katakana() {
        assert_eq!(normalize_to_katakana("やまだたろう"), "ヤマダタロウ");
        assert_eq!(normalize_to_katakana("ﾔﾏﾀﾞﾀﾛｳ"), "ヤマダタロウ");
        assert_eq!(normalize_to_katakana("やまだﾀﾛｳ"), "ヤマダタロウ");
        assert_eq!(normalize_to_katakana("山田ﾀﾛｳ"), "山田タロウ");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "やまだたろう",
            "ﾔﾏﾀﾞﾀﾛｳ",
            "やまだﾀﾛｳ",
            "ｶﾟﾊﾞﾞ",
            "ﾞあﾟ",
            "山田 太郎",
            "ジョン・スミス",
            "ﾊﾟｰﾃｨｰ",
        ];
        for s in samples {
            let once = normalize_to_katakana(s);
            assert_eq!(normalize_to_katakana(&once), once, "{s}");
        }
    }
}

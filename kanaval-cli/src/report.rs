//! Batch validation of line-oriented input (one name kana per line).

use std::collections::BTreeMap;
use std::fmt;

use kanaval_engine::{KatakanaValidation, ValidationOptions, validate_katakana};
use rayon::prelude::*;
use serde::Serialize;

/// Validation outcome for one input line.
#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    #[serde(flatten)]
    pub result: KatakanaValidation,
}

/// Validate every line in parallel. Reports keep input order.
pub fn check_lines<S>(lines: &[S], options: &ValidationOptions) -> Vec<LineReport>
where
    S: AsRef<str> + Sync,
{
    check_lines_with(lines, options, || {})
}

/// Like [`check_lines`], calling `on_line` once per finished line.
pub fn check_lines_with<S, F>(
    lines: &[S],
    options: &ValidationOptions,
    on_line: F,
) -> Vec<LineReport>
where
    S: AsRef<str> + Sync,
    F: Fn() + Sync,
{
    lines
        .par_iter()
        .enumerate()
        .map(|(idx, text)| {
            let text = text.as_ref();
            let result = validate_katakana(Some(text), options);
            on_line();
            LineReport {
                line: idx + 1,
                text: text.to_string(),
                result,
            }
        })
        .collect()
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Valid lines whose stored value differs from the input
    pub normalized: usize,
    /// Invalid lines keyed by error code
    pub errors: BTreeMap<&'static str, usize>,
}

impl Summary {
    pub fn from_reports(reports: &[LineReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.result.is_valid {
                summary.valid += 1;
                if report.result.normalized_text.is_some() {
                    summary.normalized += 1;
                }
            } else {
                summary.invalid += 1;
            }
            if let Some(err) = report.result.error_message {
                *summary.errors.entry(err.code()).or_default() += 1;
            }
        }
        summary
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.result.error_message, &self.result.normalized_text) {
            (Some(err), _) => write!(f, "{:>6}  NG  {}  ({})", self.line, self.text, err),
            (None, Some(normalized)) => {
                write!(f, "{:>6}  OK  {} -> {}", self.line, self.text, normalized)
            }
            (None, None) => write!(f, "{:>6}  OK  {}", self.line, self.text),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line(s): {} valid ({} normalized), {} invalid",
            self.total, self.valid, self.normalized, self.invalid
        )?;
        for (code, count) in &self.errors {
            write!(f, "\n  {code}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ROSTER: [&str; 6] = [
        "ヤマダタロウ",
        "ﾔﾏﾀﾞﾀﾛｳ",
        "やまだはなこ",
        "",
        "山田太郎",
        "スズキ",
    ];

    #[test]
    fn test_reports_keep_order() {
        let reports = check_lines(&ROSTER, &ValidationOptions::default());
        let lines: Vec<usize> = reports.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(reports[4].text, "山田太郎");
    }

    #[test]
    fn test_summary_strict() {
        let reports = check_lines(&ROSTER, &ValidationOptions::default());
        let summary = Summary::from_reports(&reports);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 4);
        assert_eq!(summary.normalized, 0);
        assert_eq!(summary.errors.get("required"), Some(&1));
        assert_eq!(summary.errors.get("not_katakana"), Some(&2));
        assert_eq!(summary.errors.get("not_full_width"), Some(&1));
        assert!(!summary.all_valid());
    }

    #[test]
    fn test_summary_auto_normalize() {
        let options = ValidationOptions::default().with_auto_normalize(true);
        let reports = check_lines(&ROSTER, &options);
        let summary = Summary::from_reports(&reports);
        assert_eq!(summary.valid, 4);
        assert_eq!(summary.normalized, 2);
        assert_eq!(summary.invalid, 2);
        assert_eq!(
            reports[2].result.normalized_text.as_deref(),
            Some("ヤマダハナコ")
        );
    }

    #[test]
    fn test_progress_callback() {
        let seen = AtomicUsize::new(0);
        check_lines_with(&ROSTER, &ValidationOptions::default(), || {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(seen.load(Ordering::Relaxed), ROSTER.len());
    }

    #[test]
    fn test_display() {
        let options = ValidationOptions::default().with_auto_normalize(true);
        let reports = check_lines(&["ｱｷｺ", "Akiko"], &options);
        assert_eq!(reports[0].to_string(), "     1  OK  ｱｷｺ -> アキコ");
        assert_eq!(
            reports[1].to_string(),
            "     2  NG  Akiko  (カタカナで入力してください)"
        );

        let summary = Summary::from_reports(&reports);
        assert_eq!(
            summary.to_string(),
            "2 line(s): 1 valid (1 normalized), 1 invalid\n  not_katakana: 1"
        );
    }

    #[test]
    fn test_leading_byte_order_mark() {
        // Spreadsheet exports start the first line with U+FEFF
        let content = "\u{FEFF}ヤマダ\nスズキ\n";
        let lines: Vec<&str> = content.lines().collect();
        let summary = Summary::from_reports(&check_lines(&lines, &ValidationOptions::default()));
        assert_eq!(summary.valid, 2);
        assert!(summary.all_valid());
    }

    #[test]
    fn test_json_line_shape() {
        let reports = check_lines(&["ヤマダ"], &ValidationOptions::default());
        let value = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "line": 1,
                "text": "ヤマダ",
                "isValid": true,
                "isKatakana": true,
                "isFullWidth": true,
            })
        );
    }
}

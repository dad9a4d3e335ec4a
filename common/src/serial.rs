//! 製造番号（シリアル）の解析
//!
//! 1. ラベル付き: `S/N`・`製造番号`・`管理番号`・行頭の `No.` などの直後の英数字列
//! 2. フォールバック: `SN`・`NO`・`製造` 等を含む行の6文字以上の英数字列
//!
//! どちらも1行の中だけで判定し、行をまたいで連結しない。

use crate::bad_tokens::BadTokenSet;
use crate::confusable::correct_serial_token;
use crate::model::model_label_values;
use regex::Regex;
use tracing::debug;

/// フォールバック対象行の目印（大文字で比較）
const SERIAL_HINTS: &[&str] = &["SN", "SERIAL", "NO", "製造", "製番"];

/// ラベル直後の値として扱う最小文字数
const MIN_LABELED_LEN: usize = 4;

/// フォールバックで拾う英数字列の最小文字数
const MIN_FALLBACK_LEN: usize = 6;

lazy_static::lazy_static! {
    /// ラベルパターン（上から順に試す）
    static ref SERIAL_LABELS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:S\s*/\s*N|S\.N\.?|SERIAL\s*(?:NO\.?|NUMBER|#)?|SER\.?\s*NO\.?)[\s:#.\-]*([A-Za-z0-9][A-Za-z0-9\-]*)").unwrap(),
        Regex::new(r"(?i)(?:製造番号|製品番号|製番|製造\s*NO\.?)[\s:#.\-]*([A-Za-z0-9][A-Za-z0-9\-]*)").unwrap(),
        Regex::new(r"(?:管理番号|本体番号)[\s:#.\-]*([A-Za-z0-9][A-Za-z0-9\-]*)").unwrap(),
        Regex::new(r"(?i)^NO(?:\.|:|\s)[\s:#.\-]*([A-Za-z0-9][A-Za-z0-9\-]*)").unwrap(),
    ];
    static ref ALNUM_RUN_RE: Regex = Regex::new(r"[A-Za-z0-9\-]{6,}").unwrap();
}

/// 製造番号を解析する
///
/// # Arguments
/// * `lines` - 正規化済みの行リスト
/// * `bad` - 採用しない語
///
/// # Returns
/// 補正・大文字化した製造番号。見つからなければ空文字
pub fn resolve_serial<S: AsRef<str>>(lines: &[S], bad: &BadTokenSet) -> String {
    if let Some(serial) = labeled_serial(lines, bad) {
        debug!(serial = %serial, "製造番号をラベルから検出");
        return serial;
    }
    if let Some(serial) = hinted_serial(lines, bad) {
        debug!(serial = %serial, "製造番号を周辺語から推定");
        return serial;
    }
    String::new()
}

fn labeled_serial<S: AsRef<str>>(lines: &[S], bad: &BadTokenSet) -> Option<String> {
    lines.iter().map(AsRef::as_ref).find_map(|line| {
        SERIAL_LABELS.iter().find_map(|label| {
            let caps = label.captures(line)?;
            let raw = caps.get(1)?.as_str().trim().trim_end_matches('-');
            if raw.chars().count() < MIN_LABELED_LEN {
                return None;
            }
            let candidate = correct_serial_token(raw).to_uppercase();
            (is_serial_shaped(&candidate) && !bad.contains(&candidate)).then_some(candidate)
        })
    })
}

fn hinted_serial<S: AsRef<str>>(lines: &[S], bad: &BadTokenSet) -> Option<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| {
            let upper = line.to_uppercase();
            SERIAL_HINTS.iter().any(|hint| upper.contains(hint))
        })
        .find_map(|line| {
            // 型番ラベルの値は製造番号として拾わない
            let model_values = model_label_values(line);
            ALNUM_RUN_RE.find_iter(line).find_map(|m| {
                if model_values.iter().any(|v| m.start() < v.end && v.start < m.end()) {
                    return None;
                }
                let raw = m.as_str().trim_matches('-');
                if raw.chars().count() < MIN_FALLBACK_LEN {
                    return None;
                }
                let candidate = correct_serial_token(raw).to_uppercase();
                (has_letter_and_digit(&candidate) && !bad.contains(&candidate)).then_some(candidate)
            })
        })
}

fn has_letter_and_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic()) && token.chars().any(|c| c.is_ascii_digit())
}

/// 英数混在 6〜24文字、または数字のみ 8〜20文字
fn is_serial_shaped(token: &str) -> bool {
    let len = token.chars().count();
    let all_digits = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());

    ((6..=24).contains(&len) && has_letter_and_digit(token))
        || ((8..=20).contains(&len) && all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(lines: &[&str]) -> String {
        resolve_serial(lines, &BadTokenSet::default())
    }

    #[test]
    fn test_labeled_serial_with_correction() {
        assert_eq!(resolve(&["S/N: AB1234O6"]), "AB123406");
        assert_eq!(resolve(&["S/N:1234567890AB"]), "1234567890AB");
        assert_eq!(resolve(&["Serial No. 7O1234567"]), "701234567");
    }

    #[test]
    fn test_labeled_serial_japanese() {
        assert_eq!(resolve(&["製造番号 12345678"]), "12345678");
        assert_eq!(resolve(&["製造No.0A12345"]), "0A12345");
        assert_eq!(resolve(&["管理番号:K-2034561"]), "K-2034561");
        assert_eq!(resolve(&["No. 98765432"]), "98765432");
    }

    #[test]
    fn test_labeled_serial_rejects_bad_shape() {
        // 数字のみ7文字は短すぎる
        assert_eq!(resolve(&["S/N 1234567"]), "");
        // 英字のみ
        assert_eq!(resolve(&["SERIAL ABCDEFGH"]), "");
    }

    #[test]
    fn test_first_accepted_line_wins() {
        assert_eq!(
            resolve(&["S/N 12", "製造番号 A1C2D3E4", "S/N 9Z9Z9Z9Z"]),
            "A1C2D3E4"
        );
    }

    #[test]
    fn test_hinted_fallback() {
        assert_eq!(resolve(&["SN 記載", "製造 ロット XK4421907"]), "XK4421907");
        assert_eq!(resolve(&["ABC123456"]), "");
    }

    #[test]
    fn test_fallback_skips_model_lines() {
        assert_eq!(resolve(&["MODEL NO. NA-VX3800"]), "");
    }

    #[test]
    fn test_fallback_scans_rest_of_model_line() {
        assert_eq!(resolve(&["型式 XYZ 製造 LOT AB1234567"]), "AB1234567");
        assert_eq!(resolve(&["MODEL NO. NA-VX3800 SN K7Q20345"]), "K7Q20345");
    }

    #[test]
    fn test_bad_tokens_never_returned() {
        // ラベル付き
        assert_eq!(resolve(&["S/N AC100V"]), "");
        // フォールバック
        assert_eq!(resolve(&["SN AC100V"]), "");
        assert_eq!(resolve(&["SN AC100V XK4421907"]), "XK4421907");
    }

    #[test]
    fn test_never_spans_lines() {
        assert_eq!(resolve(&["S/N", "12345678AB"]), "");
    }
}

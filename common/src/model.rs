//! 型番（形式）の解析
//!
//! 1. ラベル付き: `型番`・`形式`・`MODEL NO.` などの直後の英数字列
//! 2. スコア方式: 全行の英字始まりトークンを採点し、最高点を採用
//!
//! 製造番号と同じ値は型番として返さない。

use crate::bad_tokens::BadTokenSet;
use crate::confusable::correct_model_token;
use regex::Regex;
use std::ops::Range;
use tracing::debug;

/// 型番として扱う長さ
const MODEL_LEN: std::ops::RangeInclusive<usize> = 3..=25;

/// 採用する最低スコア
const MIN_SCORE: u32 = 4;

/// トークン末尾から取り除く区切り文字
const SEPARATORS: &[char] = &['-', '/', '.'];

lazy_static::lazy_static! {
    static ref MODEL_LABEL_RE: Regex = Regex::new(
        r"(?:製品型番|形式名|型番|型式|形式|形名|品番|MODEL\s*NO\.?|MODEL|MOD\.)[\s:#.\-]*([A-Z0-9][A-Z0-9\-/.]*)"
    ).unwrap();
    static ref MODEL_LABEL_ANY_CASE_RE: Regex = Regex::new(
        r"(?i)(?:製品型番|形式名|型番|型式|形式|形名|品番|MODEL\s*NO\.?|MODEL|MOD\.)[\s:#.\-]*([A-Z0-9][A-Z0-9\-/.]*)"
    ).unwrap();
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z0-9][A-Za-z0-9\-/.]*").unwrap();
    static ref WORD_HYPHEN_RE: Regex = Regex::new(r"^[A-Z]+-[A-Z0-9]+").unwrap();
}

/// 行内で型番ラベルの直後にある値のバイト範囲
pub fn model_label_values(line: &str) -> Vec<Range<usize>> {
    MODEL_LABEL_ANY_CASE_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.range()))
        .collect()
}

/// 型番を解析する
///
/// # Arguments
/// * `lines` - 正規化済みの行リスト
/// * `serial` - 解決済みの製造番号（同じ値を除外する）
/// * `bad` - 採用しない語
///
/// # Returns
/// 補正・大文字化した型番。見つからなければ空文字
pub fn resolve_model<S: AsRef<str>>(lines: &[S], serial: &str, bad: &BadTokenSet) -> String {
    if let Some(model) = labeled_model(lines, serial, bad) {
        debug!(model = %model, "型番をラベルから検出");
        return model;
    }
    if let Some(model) = scored_model(lines, serial, bad) {
        debug!(model = %model, "型番をスコアで推定");
        return model;
    }
    String::new()
}

fn labeled_model<S: AsRef<str>>(lines: &[S], serial: &str, bad: &BadTokenSet) -> Option<String> {
    let upper = lines
        .iter()
        .map(|l| l.as_ref().to_uppercase())
        .collect::<Vec<_>>()
        .join("\n");

    MODEL_LABEL_RE.captures_iter(&upper).find_map(|caps| {
        let raw = caps.get(1)?.as_str().trim_end_matches(SEPARATORS);
        if !MODEL_LEN.contains(&raw.chars().count()) {
            return None;
        }
        let candidate = correct_model_token(raw);
        (!bad.contains(&candidate) && candidate != serial).then_some(candidate)
    })
}

fn scored_model<S: AsRef<str>>(lines: &[S], serial: &str, bad: &BadTokenSet) -> Option<String> {
    let mut candidates: Vec<(String, u32)> = lines
        .iter()
        .flat_map(|line| {
            TOKEN_RE
                .find_iter(line.as_ref())
                .map(|m| m.as_str().trim_end_matches(SEPARATORS).to_uppercase())
                .collect::<Vec<_>>()
        })
        .filter(|token| MODEL_LEN.contains(&token.chars().count()))
        .filter(|token| token.starts_with(|c: char| c.is_ascii_alphabetic()))
        .filter(|token| !bad.contains(token) && token != serial && !is_all_digits(token))
        .map(|token| correct_model_token(&token))
        .filter(|token| !bad.contains(token) && token != serial)
        .map(|token| {
            let score = score_token(&token);
            (token, score)
        })
        .filter(|(_, score)| *score >= MIN_SCORE)
        .collect();

    // 安定ソートなので同点は出現順
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.into_iter().next().map(|(token, _)| token)
}

fn is_all_digits(token: &str) -> bool {
    token.chars().count() >= 3 && token.chars().all(|c| c.is_ascii_digit())
}

/// 型番らしさのスコア
fn score_token(token: &str) -> u32 {
    let mut score = 0;
    if token.contains('-') {
        score += 3;
    }
    if token.chars().any(|c| c.is_ascii_alphabetic()) && token.chars().any(|c| c.is_ascii_digit()) {
        score += 3;
    }
    if (3..=18).contains(&token.chars().count()) {
        score += 2;
    }
    if WORD_HYPHEN_RE.is_match(token) {
        score += 2;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(lines: &[&str], serial: &str) -> String {
        resolve_model(lines, serial, &BadTokenSet::default())
    }

    #[test]
    fn test_labeled_model() {
        assert_eq!(resolve(&["Panasonic", "型番: NA-VX3800"], ""), "NA-VX3800");
        assert_eq!(resolve(&["MODEL NO. ks-1O5"], ""), "KS-105");
        assert_eq!(resolve(&["形式", "RAS-X40L2"], ""), "RAS-X40L2");
    }

    #[test]
    fn test_labeled_bad_token_falls_back() {
        assert_eq!(resolve(&["MODEL: INVERTER", "CS-X289C"], ""), "CS-X289C");
    }

    #[test]
    fn test_scored_prefers_highest() {
        assert_eq!(resolve(&["ABC-DEF", "NA-VX3800"], ""), "NA-VX3800");
        assert_eq!(resolve(&["HELLO WORLD"], ""), "");
    }

    #[test]
    fn test_scored_tie_keeps_scan_order() {
        assert_eq!(resolve(&["XA-100", "YB-200"], ""), "XA-100");
    }

    #[test]
    fn test_excludes_serial() {
        assert_eq!(resolve(&["AB-123456"], "AB-123456"), "");
        assert_eq!(resolve(&["MODEL AB-123456", "CD-789"], "AB-123456"), "CD-789");
    }

    #[test]
    fn test_excludes_bad_tokens() {
        assert_eq!(resolve(&["PANASONIC INVERTER AC100V"], ""), "");
    }

    #[test]
    fn test_model_label_values() {
        let line = "型式 XYZ 製造 LOT AB1234567";
        let values: Vec<&str> = model_label_values(line).into_iter().map(|r| &line[r]).collect();
        assert_eq!(values, vec!["XYZ"]);
        assert_eq!(model_label_values("Model No. na-vx3800").len(), 1);
        assert!(model_label_values("S/N 12345678").is_empty());
    }

    #[test]
    fn test_score_token() {
        assert_eq!(score_token("NA-VX3800"), 10);
        assert_eq!(score_token("ABC123"), 5);
        assert_eq!(score_token("ABCDEF"), 2);
    }
}

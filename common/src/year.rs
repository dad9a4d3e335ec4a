//! 年式（製造年）の解析
//!
//! 優先順位:
//! 1. 「製造年」「製造年月」「年式」ラベル付きの西暦
//! 2. 和暦（令和/平成/昭和 + 年数 + 年）
//! 3. 元号略記（R/H/S + 1〜2桁）
//! 4. 単独の4桁西暦（2010〜今年+1）
//! 5. YYYY/MM 形式の日付の年部分

use crate::normalize::normalize_text;
use chrono::Datelike;
use regex::Regex;
use tracing::debug;

/// 元号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Era {
    /// 元号名（令和）
    pub name: &'static str,
    /// 略記（R）
    pub letter: char,
    /// 西暦 = base + 年数
    pub base: i32,
}

/// 元号テーブル
pub const ERAS: [Era; 3] = [
    Era { name: "令和", letter: 'R', base: 2018 },
    Era { name: "平成", letter: 'H', base: 1988 },
    Era { name: "昭和", letter: 'S', base: 1925 },
];

/// 「元年」の年数。元年は元号の基準年として返す。
const GANNEN: i32 = 0;

/// 略記の年数として受け付ける範囲
const ERA_LETTER_RANGE: std::ops::RangeInclusive<i32> = 1..=39;

/// 単独4桁西暦の下限
const MIN_BARE_YEAR: i32 = 2010;

fn era_by_name(name: &str) -> Option<&'static Era> {
    ERAS.iter().find(|e| e.name == name)
}

fn era_by_letter(letter: char) -> Option<&'static Era> {
    ERAS.iter().find(|e| e.letter == letter)
}

/// 現在の年（ローカル時刻）
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// 年式を解析する（現在年はシステム時計から取得）
pub fn resolve_year(raw: &str) -> String {
    resolve_year_at(raw, current_year())
}

/// 年式を解析する
///
/// # Arguments
/// * `raw` - 正規化前のOCRテキスト（内部でNFKC正規化する）
/// * `current_year` - 単独4桁西暦の上限判定に使う年
///
/// # Returns
/// 西暦4桁の文字列。見つからなければ空文字
pub fn resolve_year_at(raw: &str, current_year: i32) -> String {
    let text = normalize_text(raw);

    let strategies: [(&str, fn(&str, i32) -> Option<i32>); 5] = [
        ("labeled", labeled_year),
        ("era-name", era_name_year),
        ("era-letter", era_letter_year),
        ("bare", bare_year),
        ("date", date_year),
    ];

    for (name, strategy) in strategies {
        if let Some(year) = strategy(&text, current_year) {
            debug!(strategy = name, year, "年式を検出");
            return year.to_string();
        }
    }

    String::new()
}

/// 直前の文字がASCII英数字でない
fn starts_token(text: &str, start: usize) -> bool {
    !text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
}

/// 直後の文字がASCII数字でない
fn no_digit_after(text: &str, end: usize) -> bool {
    !text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn labeled_year(text: &str, _current_year: i32) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref LABELED_RE: Regex =
            Regex::new(r"(?:製造年月日|製造年月|製造年|年式)[\s:.\-]*([0-9]{4})").unwrap();
    }

    LABELED_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find(|m| no_digit_after(text, m.end()))
        .and_then(|m| m.as_str().parse().ok())
}

fn era_name_year(text: &str, _current_year: i32) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref ERA_NAME_RE: Regex =
            Regex::new(r"(令和|平成|昭和)\s*(元|[0-9]{1,2})\s*年").unwrap();
    }

    let caps = ERA_NAME_RE.captures(text)?;
    let era = era_by_name(&caps[1])?;
    let era_year = match &caps[2] {
        "元" => GANNEN,
        digits => digits.parse().ok()?,
    };
    Some(era.base + era_year)
}

fn era_letter_year(text: &str, current_year: i32) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref ERA_LETTER_RE: Regex = Regex::new(r"([RHS])([0-9]{1,2})").unwrap();
    }

    ERA_LETTER_RE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if !starts_token(text, whole.start()) || !no_digit_after(text, whole.end()) {
            return None;
        }
        let era = era_by_letter(caps[1].chars().next()?)?;
        let era_year: i32 = caps[2].parse().ok()?;
        if !ERA_LETTER_RANGE.contains(&era_year) {
            return None;
        }
        // R32（冷媒）など未来の年になるものは除外
        let year = era.base + era_year;
        (year <= current_year + 1).then_some(year)
    })
}

fn bare_year(text: &str, current_year: i32) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref DIGIT_RUN_RE: Regex = Regex::new(r"[0-9]+").unwrap();
        static ref YEAR_SHAPE_RE: Regex = Regex::new(r"^(?:19[0-9]{2}|20[0-3][0-9])$").unwrap();
    }

    DIGIT_RUN_RE
        .find_iter(text)
        .filter(|m| starts_token(text, m.start()))
        .filter(|m| {
            !text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
        })
        .filter(|m| YEAR_SHAPE_RE.is_match(m.as_str()))
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .find(|year| (MIN_BARE_YEAR..=current_year + 1).contains(year))
}

fn date_year(text: &str, _current_year: i32) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex =
            Regex::new(r"((?:19|20)[0-9]{2})[/.\-]([0-9]{1,2})").unwrap();
    }

    DATE_RE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if !starts_token(text, whole.start()) || !no_digit_after(text, whole.end()) {
            return None;
        }
        let month: u32 = caps[2].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        caps[1].parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i32 = 2026;

    #[test]
    fn test_labeled_year_wins_over_bare() {
        assert_eq!(resolve_year_at("定格 2019\n製造年:2015年", NOW), "2015");
        assert_eq!(resolve_year_at("製造年：２０１７年", NOW), "2017");
        assert_eq!(resolve_year_at("製造年月 2012.08", NOW), "2012");
        assert_eq!(resolve_year_at("年式 2008", NOW), "2008");
    }

    #[test]
    fn test_era_name_conversion() {
        assert_eq!(resolve_year_at("令和3年製", NOW), "2021");
        assert_eq!(resolve_year_at("平成 30 年", NOW), "2018");
        assert_eq!(resolve_year_at("昭和63年", NOW), "1988");
        assert_eq!(resolve_year_at("平成元年", NOW), "1988");
        assert_eq!(resolve_year_at("㍻22年", NOW), "2010");
    }

    #[test]
    fn test_era_letter_conversion() {
        assert_eq!(resolve_year_at("R5", NOW), "2023");
        assert_eq!(resolve_year_at("製造 H27.4", NOW), "2015");
        assert_eq!(resolve_year_at("AR5", NOW), "");
        assert_eq!(resolve_year_at("H123", NOW), "");
    }

    #[test]
    fn test_era_letter_rejects_future_year() {
        // 冷媒 R32 は 2050年になるため年式として扱わない
        assert_eq!(resolve_year_at("冷媒 R32 0.8kg", NOW), "");
        assert_eq!(resolve_year_at("R410A", NOW), "");
    }

    #[test]
    fn test_bare_year_range() {
        assert_eq!(resolve_year_at("2008 2019", NOW), "2019");
        assert_eq!(resolve_year_at("2027", NOW), "2027");
        assert_eq!(resolve_year_at("2028", NOW), "");
        assert_eq!(resolve_year_at("AC100V 1200W 20190", NOW), "");
    }

    #[test]
    fn test_date_year() {
        assert_eq!(resolve_year_at("1998/05", NOW), "1998");
        assert_eq!(resolve_year_at("2005-13", NOW), "");
    }

    #[test]
    fn test_no_year() {
        assert_eq!(resolve_year_at("", NOW), "");
        assert_eq!(resolve_year_at("Panasonic NA-VX3800", NOW), "");
    }
}

//! OCR誤認識文字の補正
//!
//! `O`↔`0`、`I`/`l`↔`1`、`Z`↔`2`、`S`↔`5`、`B`↔`8` の取り違えを直す。
//! - 型番向け: 数字に隣接する文字だけを置換（英字部分を壊さない）
//! - 製造番号向け: 数字が4割以上のトークンで、英字の並びに属さない文字を置換

/// 製造番号補正を行う数字比率の下限
const SERIAL_DIGIT_RATIO: f64 = 0.4;

/// 誤認識しやすい英字 → 数字
fn confusable_digit(c: char) -> Option<char> {
    match c {
        'O' | 'o' => Some('0'),
        'I' | 'l' => Some('1'),
        'Z' => Some('2'),
        'S' => Some('5'),
        'B' => Some('8'),
        _ => None,
    }
}

/// 型番トークンの補正
///
/// 直前または直後が数字の場合のみ置換する。隣接判定は元のトークンで行う。
pub fn correct_model_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let prev_is_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_is_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            match confusable_digit(c) {
                Some(digit) if prev_is_digit || next_is_digit => digit,
                _ => c,
            }
        })
        .collect()
}

/// 製造番号トークンの補正
///
/// 数字の比率が0.4未満なら変更しない。
/// それ以上なら、前後どちらにも英字が無い誤認識文字をすべて置換する。
pub fn correct_serial_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let digits = chars.iter().filter(|c| c.is_ascii_digit()).count();
    if (digits as f64) / (chars.len() as f64) < SERIAL_DIGIT_RATIO {
        return token.to_string();
    }

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let prev_is_alpha = i > 0 && chars[i - 1].is_ascii_alphabetic();
            let next_is_alpha = chars.get(i + 1).is_some_and(|n| n.is_ascii_alphabetic());
            match confusable_digit(c) {
                Some(digit) if !prev_is_alpha && !next_is_alpha => digit,
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_token_adjacent_only() {
        assert_eq!(correct_model_token("KS-1O5"), "KS-105");
        assert_eq!(correct_model_token("NA-VX38OO"), "NA-VX380O");
        assert_eq!(correct_model_token("SR-BOX"), "SR-BOX");
        assert_eq!(correct_model_token("MR-l2Z"), "MR-122");
    }

    #[test]
    fn test_model_token_no_digits() {
        assert_eq!(correct_model_token("INVERTER"), "INVERTER");
        assert_eq!(correct_model_token(""), "");
    }

    #[test]
    fn test_serial_token_digit_dominant() {
        assert_eq!(correct_serial_token("AB1234O6"), "AB123406");
        assert_eq!(correct_serial_token("12345O7B9"), "123450789");
        assert_eq!(correct_serial_token("S1234567"), "51234567");
        assert_eq!(correct_serial_token("1234567890AB"), "1234567890AB");
    }

    #[test]
    fn test_serial_token_letter_dominant_unchanged() {
        assert_eq!(correct_serial_token("ABCDEO1"), "ABCDEO1");
        assert_eq!(correct_serial_token("SOB1"), "SOB1");
    }
}

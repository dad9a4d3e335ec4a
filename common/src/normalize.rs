//! OCRテキストの正規化
//!
//! 全角英数・互換文字をNFKCで畳み込み、空行を除いた行リストにする。

use unicode_normalization::UnicodeNormalization;

/// NFKC正規化（全角→半角、互換文字の統一）
///
/// `№` → `No`、`㍻` → `平成`、`ＡＢ１２` → `AB12` のように変換される。
pub fn normalize_text(text: &str) -> String {
    text.nfkc().collect()
}

/// 正規化して行単位に分割する
///
/// 各行の前後空白を除去し、空行は捨てる。冪等。
pub fn normalize_lines(text: &str) -> Vec<String> {
    normalize_text(text)
        .lines()
        .flat_map(|line| line.split('\r'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

//! 型番・製造番号として採用しない語
//!
//! 単位・注意書き・ラベル語・冷媒名・メーカー名（英字）を大文字で保持する。

use crate::maker::AliasTable;
use std::collections::HashSet;

const BUILTIN_BAD_TOKENS: &[&str] = &[
    // ラベル語
    "MODEL", "MOD", "TYPE", "SERIAL", "NUMBER", "SHOT", "DATE", "YEAR",
    // 注意書き
    "CAUTION", "WARNING", "DANGER", "NOTICE", "INVERTER",
    // 定格表示
    "RATED", "POWER", "VOLTAGE", "CURRENT", "FREQUENCY", "INPUT", "OUTPUT", "CAPACITY",
    "CONSUMPTION", "WEIGHT", "MASS", "NET", "INDOOR", "OUTDOOR", "UNIT", "COOLING", "HEATING",
    "REFRIGERANT", "PRESSURE",
    // 単位
    "AC100V", "AC200V", "100V", "200V", "50HZ", "60HZ", "50/60HZ", "KWH", "WATT", "WATTS",
    "VOLT", "VOLTS", "AMP", "MPA", "KPA",
    // 冷媒
    "R22", "R32", "R134A", "R410A", "R600A",
    // 生産国・社名の付属語
    "MADE", "JAPAN", "CHINA", "THAILAND", "MALAYSIA", "INDONESIA", "VIETNAM", "KOREA",
    "CORP", "CORPORATION", "LTD", "INC", "ELECTRIC", "ELECTRONICS", "APPLIANCES",
];

/// 除外語セット（大文字）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadTokenSet {
    tokens: HashSet<String>,
}

impl Default for BadTokenSet {
    fn default() -> Self {
        Self::for_makers(&AliasTable::builtin())
    }
}

impl BadTokenSet {
    /// 組み込み語 + メーカー表の英字別名
    pub fn for_makers(makers: &AliasTable) -> Self {
        let tokens = BUILTIN_BAD_TOKENS
            .iter()
            .map(|t| t.to_string())
            .chain(makers.latin_words())
            .collect();
        Self { tokens }
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|t| t.as_ref().trim().to_uppercase()));
    }

    /// 大文字で比較する
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

//! メーカー名の解決
//!
//! 英字表記（HITACHI）とカタカナ・漢字表記（日立）の別名表を上から順に照合し、
//! 最初に見つかった正式名を返す。旧ブランド（ナショナル等）は表の末尾に置く。

use serde::{Deserialize, Serialize};

/// 組み込みメーカー表（正式名, 別名）
const BUILTIN_MAKERS: &[(&str, &[&str])] = &[
    ("Panasonic", &["PANASONIC", "パナソニック"]),
    ("Hitachi", &["HITACHI", "日立"]),
    ("Toshiba", &["TOSHIBA", "東芝"]),
    ("Sharp", &["SHARP", "シャープ"]),
    ("Sony", &["SONY", "ソニー"]),
    ("Mitsubishi", &["MITSUBISHI", "三菱電機", "三菱"]),
    ("Daikin", &["DAIKIN", "ダイキン"]),
    ("Fujitsu General", &["FUJITSU GENERAL", "FUJITSU", "富士通ゼネラル", "富士通"]),
    ("Corona", &["CORONA", "コロナ"]),
    ("Hisense", &["HISENSE", "ハイセンス"]),
    ("Haier", &["HAIER", "ハイアール"]),
    ("LG", &["LG", "エルジー"]),
    ("Samsung", &["SAMSUNG", "サムスン"]),
    ("Iris Ohyama", &["IRIS OHYAMA", "IRISOHYAMA", "アイリスオーヤマ"]),
    ("BALMUDA", &["BALMUDA", "バルミューダ"]),
    ("AQUA", &["AQUA", "アクア"]),
    ("Zojirushi", &["ZOJIRUSHI", "象印"]),
    ("Tiger", &["TIGER", "タイガー"]),
    ("Sanyo", &["SANYO", "三洋"]),
    // 旧ブランド
    ("Panasonic", &["NATIONAL", "ナショナル"]),
];

/// メーカー1件分の別名定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerEntry {
    /// 抽出結果に入る正式名
    pub canonical: String,
    /// 別名（英字は大文字で比較、日本語は部分一致）
    pub aliases: Vec<String>,
}

impl MakerEntry {
    pub fn new(canonical: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn matches(&self, upper_text: &str) -> bool {
        self.aliases.iter().any(|alias| alias_matches(alias, upper_text))
    }
}

/// メーカー別名表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<MakerEntry>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// 組み込みの表
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_MAKERS
                .iter()
                .map(|(canonical, aliases)| MakerEntry::new(*canonical, aliases))
                .collect(),
        )
    }

    pub fn from_entries(entries: Vec<MakerEntry>) -> Self {
        Self { entries }
    }

    /// 表の末尾に追加する（既存エントリより優先度は低い）
    pub fn extend(&mut self, entries: impl IntoIterator<Item = MakerEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[MakerEntry] {
        &self.entries
    }

    /// 英字の別名を単語単位で列挙（型番・製造番号の除外語に使う）
    pub fn latin_words(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.aliases.iter())
            .filter(|a| a.is_ascii())
            .flat_map(|a| a.split_whitespace())
            .map(|w| w.to_uppercase())
    }

    /// 大文字化済みテキストからメーカーの正式名を探す
    ///
    /// 見つからなければ空文字
    pub fn resolve(&self, upper_text: &str) -> String {
        let collapsed = upper_text.split_whitespace().collect::<Vec<_>>().join(" ");

        self.entries
            .iter()
            .find(|e| e.matches(&collapsed))
            .map(|e| e.canonical.clone())
            .unwrap_or_default()
    }
}

/// 組み込み表でメーカーを解決する
pub fn resolve_maker(upper_text: &str) -> String {
    lazy_static::lazy_static! {
        static ref BUILTIN: AliasTable = AliasTable::builtin();
    }
    BUILTIN.resolve(upper_text)
}

fn alias_matches(alias: &str, upper_text: &str) -> bool {
    if alias.is_empty() {
        return false;
    }
    if !alias.is_ascii() {
        return upper_text.contains(alias);
    }

    let needle = alias.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    upper_text.match_indices(needle.as_str()).any(|(start, m)| {
        let before = upper_text[..start].chars().next_back();
        let after = upper_text[start + m.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

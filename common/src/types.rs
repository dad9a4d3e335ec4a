//! 抽出結果の型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - FieldResult: 4項目（メーカー・型番・製造番号・年式）の抽出結果
//! - Shot: 1回の撮影で得たOCRテキスト
//! - ShotExtraction: 撮影ごとの結果と統合結果

use serde::{Deserialize, Serialize};

/// 抽出対象の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Maker,
    Model,
    Serial,
    Year,
}

impl Field {
    /// 入力フォームの並び順（型番 / 製造番号 / 年式 / メーカー）
    pub const FORM_ORDER: [Field; 4] = [Field::Model, Field::Serial, Field::Year, Field::Maker];

    /// JSONキー名
    pub fn key(&self) -> &'static str {
        match self {
            Field::Maker => "maker",
            Field::Model => "model",
            Field::Serial => "serial",
            Field::Year => "year",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Maker => write!(f, "メーカー"),
            Field::Model => write!(f, "型番"),
            Field::Serial => write!(f, "製造番号"),
            Field::Year => write!(f, "年式"),
        }
    }
}

/// 抽出結果
///
/// 見つからなかった項目は空文字。キーは常に4つ揃う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldResult {
    pub maker: String,
    pub model: String,
    pub serial: String,
    pub year: String,
}

impl FieldResult {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Maker => &self.maker,
            Field::Model => &self.model,
            Field::Serial => &self.serial,
            Field::Year => &self.year,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Maker => self.maker = value,
            Field::Model => self.model = value,
            Field::Serial => self.serial = value,
            Field::Year => self.year = value,
        }
    }

    /// 空白以外の値が入っているか
    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub fn filled_count(&self) -> usize {
        Field::FORM_ORDER.iter().filter(|f| self.is_filled(**f)).count()
    }

    /// 4項目すべて空
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// 抽出進捗の1行表示
    ///
    /// 例: `型番 ✅ / 製造番号 ✗ / 年式 ✅ / メーカー ✅`
    pub fn progress_line(&self) -> String {
        Field::FORM_ORDER
            .iter()
            .map(|f| format!("{} {}", f, if self.is_filled(*f) { "✅" } else { "✗" }))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// 空の項目だけを他の結果で補完する
    pub fn merge_missing(&self, other: &FieldResult) -> FieldResult {
        let mut merged = self.clone();
        for field in Field::FORM_ORDER {
            if !merged.is_filled(field) && other.is_filled(field) {
                merged.set(field, other.get(field).to_string());
            }
        }
        merged
    }
}

/// 1回の撮影で得たOCRテキスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    /// 撮影順（1始まり）
    pub index: usize,
    pub text: String,
}

impl Shot {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self { index, text: text.into() }
    }

    /// OCRの認識行リストから作る
    pub fn from_lines<S: AsRef<str>>(index: usize, lines: &[S]) -> Self {
        let text = lines.iter().map(|l| l.as_ref()).collect::<Vec<_>>().join("\n");
        Self { index, text }
    }
}

/// 撮影ごとのテキストを1つの統合テキストにまとめる
///
/// `[SHOT i]` 見出し付きのブロックを `---` 行で連結する。
pub fn aggregate_shots(shots: &[Shot]) -> String {
    shots
        .iter()
        .map(|s| format!("[SHOT {}]\n{}", s.index, s.text))
        .collect::<Vec<_>>()
        .join("\n---\n")
}

/// 撮影ごとの抽出結果と統合テキストの抽出結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotExtraction {
    pub per_shot: Vec<FieldResult>,
    pub aggregate: FieldResult,
}

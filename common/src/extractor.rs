//! 抽出処理の統合
//!
//! 正規化 → メーカー → 製造番号 → 型番（製造番号を除外）→ 年式 の順に解決する。
//! 入力テキストだけで結果が決まり、状態を持たない。

use crate::bad_tokens::BadTokenSet;
use crate::error::Result;
use crate::maker::AliasTable;
use crate::model::resolve_model;
use crate::normalize::normalize_lines;
use crate::serial::resolve_serial;
use crate::types::{aggregate_shots, FieldResult, Shot, ShotExtraction};
use crate::vocabulary::VocabularyConfig;
use crate::year::{current_year, resolve_year_at};
use tracing::debug;

/// 年式判定に使う「今年」
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearClock {
    /// システム時計
    #[default]
    Local,
    /// 固定値（テスト・再現用）
    Fixed(i32),
}

impl YearClock {
    pub fn year(&self) -> i32 {
        match self {
            YearClock::Local => current_year(),
            YearClock::Fixed(year) => *year,
        }
    }
}

/// 銘板テキストの抽出器
///
/// 表は生成時に確定し、以後変更されない。複数スレッドから共有できる。
#[derive(Debug, Clone)]
pub struct Extractor {
    makers: AliasTable,
    bad_tokens: BadTokenSet,
    clock: YearClock,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// 組み込みの表で作る
    pub fn new() -> Self {
        let makers = AliasTable::builtin();
        let bad_tokens = BadTokenSet::for_makers(&makers);
        Self { makers, bad_tokens, clock: YearClock::Local }
    }

    /// 語彙設定を追加して作る
    pub fn with_vocabulary(vocabulary: &VocabularyConfig) -> Self {
        let mut makers = AliasTable::builtin();
        makers.extend(vocabulary.makers.iter().cloned());
        let mut bad_tokens = BadTokenSet::for_makers(&makers);
        bad_tokens.extend(&vocabulary.bad_tokens);
        Self { makers, bad_tokens, clock: YearClock::Local }
    }

    /// 語彙ファイルを読み込んで作る
    pub fn from_vocabulary_file(path: &std::path::Path) -> Result<Self> {
        let vocabulary = VocabularyConfig::from_file(path)?;
        Ok(Self::with_vocabulary(&vocabulary))
    }

    /// 「今年」を固定する
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.clock = YearClock::Fixed(year);
        self
    }

    pub fn makers(&self) -> &AliasTable {
        &self.makers
    }

    pub fn bad_tokens(&self) -> &BadTokenSet {
        &self.bad_tokens
    }

    /// OCRテキストから4項目を抽出する
    ///
    /// 空の入力は何もせず全項目空で返す。失敗はしない。
    pub fn extract(&self, raw: &str) -> FieldResult {
        if raw.trim().is_empty() {
            return FieldResult::default();
        }

        let lines = normalize_lines(raw);
        let upper = lines.join("\n").to_uppercase();

        let maker = self.makers.resolve(&upper);
        let serial = resolve_serial(&lines, &self.bad_tokens);
        let model = resolve_model(&lines, &serial, &self.bad_tokens);
        // 年式は元のテキストから（正規化は年式側で行う）
        let year = resolve_year_at(raw, self.clock.year());

        let result = FieldResult { maker, model, serial, year };
        debug!(filled = result.filled_count(), "抽出完了");
        result
    }

    /// 撮影ごとの抽出と、統合テキストでの抽出をまとめて行う
    pub fn extract_shots(&self, shots: &[Shot]) -> ShotExtraction {
        ShotExtraction {
            per_shot: shots.iter().map(|s| self.extract(&s.text)).collect(),
            aggregate: self.extract(&aggregate_shots(shots)),
        }
    }
}

/// 組み込みの表でOCRテキストから4項目を抽出する
pub fn extract_fields(raw: &str) -> FieldResult {
    lazy_static::lazy_static! {
        static ref DEFAULT_EXTRACTOR: Extractor = Extractor::new();
    }
    DEFAULT_EXTRACTOR.extract(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "Panasonic\n型番: NA-VX3800\nS/N:1234567890AB\n製造年:2019年";

    #[test]
    fn test_extract_end_to_end() {
        let result = extract_fields(LABEL);
        assert_eq!(
            result,
            FieldResult {
                maker: "Panasonic".into(),
                model: "NA-VX3800".into(),
                serial: "1234567890AB".into(),
                year: "2019".into(),
            }
        );
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_fields(""), FieldResult::default());
        assert_eq!(extract_fields("  \n "), FieldResult::default());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let extractor = Extractor::new().with_current_year(2026);
        assert_eq!(extractor.extract(LABEL), extractor.extract(LABEL));
    }

    #[test]
    fn test_extract_full_width_label() {
        let extractor = Extractor::new().with_current_year(2026);
        let result = extractor.extract("ＨＩＴＡＣＨＩ\n形式　ＲＡＳ－Ｘ４０Ｌ２\n製造番号：Ｋ２０３４５６１Ａ\n令和３年製");
        assert_eq!(result.maker, "Hitachi");
        assert_eq!(result.model, "RAS-X40L2");
        assert_eq!(result.serial, "K2034561A");
        assert_eq!(result.year, "2021");
    }

    #[test]
    fn test_extract_shots() {
        let extractor = Extractor::new().with_current_year(2026);
        let shots = vec![
            Shot::new(1, "Panasonic\n型番: NA-VX3800"),
            Shot::new(2, "S/N:1234567890AB\n製造年:2019年"),
        ];
        let extraction = extractor.extract_shots(&shots);

        assert_eq!(extraction.per_shot.len(), 2);
        assert_eq!(extraction.per_shot[0].maker, "Panasonic");
        assert_eq!(extraction.per_shot[0].serial, "");
        assert_eq!(extraction.per_shot[1].serial, "1234567890AB");
        assert_eq!(extraction.aggregate, extractor.extract(LABEL));
    }

    #[test]
    fn test_with_vocabulary() {
        let vocabulary = VocabularyConfig::from_json(
            r#"{"makers":[{"canonical":"Dyson","aliases":["DYSON"]}],"badTokens":["SV-18"]}"#,
        )
        .unwrap();
        let extractor = Extractor::with_vocabulary(&vocabulary).with_current_year(2026);
        let result = extractor.extract("DYSON\nSV-18\nHH-2034");
        assert_eq!(result.maker, "Dyson");
        assert_eq!(result.model, "HH-2034");
    }
}

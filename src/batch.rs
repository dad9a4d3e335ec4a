//! 複数製品の一括抽出
//!
//! 製品ごとの抽出は互いに独立しているため rayon で並列に実行する。

use crate::error::Result;
use crate::shots::ItemShots;
use indicatif::{ProgressBar, ProgressStyle};
use nameplate_common::{aggregate_shots, Extractor, FieldResult, Shot, ShotExtraction};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 1製品分の抽出結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub item: String,
    pub shot_count: usize,
    pub fields: FieldResult,
}

/// 撮影ごとの抽出と統合抽出を並列に行う
///
/// 結果は `Extractor::extract_shots` と同じ。
pub fn extract_shots_parallel(extractor: &Extractor, shots: &[Shot]) -> ShotExtraction {
    let (per_shot, aggregate) = rayon::join(
        || shots.par_iter().map(|s| extractor.extract(&s.text)).collect(),
        || extractor.extract(&aggregate_shots(shots)),
    );
    ShotExtraction { per_shot, aggregate }
}

/// 製品ごとに統合テキストから抽出する（入力順を保持）
pub fn extract_items(
    items: &[ItemShots],
    extractor: &Extractor,
    show_progress: bool,
) -> Vec<ItemResult> {
    let progress = if show_progress {
        ProgressBar::new(items.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let results: Vec<ItemResult> = items
        .par_iter()
        .map(|item| {
            let fields = extractor.extract(&aggregate_shots(&item.shots));
            debug!(item = %item.item, shots = item.shots.len(), filled = fields.filled_count(), "製品を抽出");
            progress.inc(1);
            ItemResult {
                item: item.item.clone(),
                shot_count: item.shots.len(),
                fields,
            }
        })
        .collect();

    progress.finish_and_clear();
    results
}

/// 抽出結果をJSONで保存
pub fn write_results(path: &Path, results: &[ItemResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 各項目の取得件数（型番, 製造番号, 年式, メーカー の順）
pub fn fill_counts(results: &[ItemResult]) -> [usize; 4] {
    let mut counts = [0; 4];
    for result in results {
        for (i, field) in nameplate_common::Field::FORM_ORDER.iter().enumerate() {
            if result.fields.is_filled(*field) {
                counts[i] += 1;
            }
        }
    }
    counts
}

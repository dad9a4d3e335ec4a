//! 回収記録の登録
//!
//! 抽出結果を確認・修正してから台帳に1行追記する。
//! `--yes` 指定時は確認を省き、抽出結果と既定値をそのまま使う。

use crate::config::Config;
use crate::error::{NameplateError, Result};
use crate::ledger::{self, CollectionRecord};
use dialoguer::{Input, Select};
use nameplate_common::{aggregate_shots, Extractor, Field, FieldResult, Shot};
use std::path::PathBuf;

/// 倉庫選択肢の末尾に付ける手入力項目
const OTHER_WAREHOUSE: &str = "その他（手入力）";

/// 登録オプション（CLI引数）
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub warehouse: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub ledger: Option<PathBuf>,
    /// 確認せずに登録
    pub assume_yes: bool,
}

/// 抽出 → 確認・修正 → 台帳追記
pub fn run_register(
    shots: &[Shot],
    options: &RegisterOptions,
    config: &Config,
    extractor: &Extractor,
) -> Result<()> {
    let raw_text = aggregate_shots(shots);
    let extracted = extractor.extract(&raw_text);

    println!("現在の撮影枚数: {}枚", shots.len());
    println!("抽出進捗: {}\n", extracted.progress_line());

    let fields = if options.assume_yes {
        extracted
    } else {
        println!("抽出候補（必要なら修正してください）");
        prompt_fields(&extracted)?
    };

    let warehouse = match &options.warehouse {
        Some(w) => w.clone(),
        None if options.assume_yes => config.warehouses.first().cloned().unwrap_or_default(),
        None => prompt_warehouse(&config.warehouses)?,
    };

    let note = optional_text(options.note.as_deref(), "", "補足", options.assume_yes)?;
    let source = optional_text(
        options.source.as_deref(),
        &config.default_source,
        "Source",
        options.assume_yes,
    )?;

    let time = options
        .time
        .as_deref()
        .unwrap_or(config.default_pickup_time.as_str());
    let today = chrono::Local::now().date_naive();
    let pickup_at = ledger::parse_pickup(options.date.as_deref(), time, today)?;

    let record = CollectionRecord {
        pickup_at: Some(pickup_at),
        warehouse,
        fields,
        note,
        raw_text,
        source,
    };

    let ledger_path = options.ledger.clone().unwrap_or_else(|| config.ledger_path());
    let count = ledger::append_record(&ledger_path, &record)?;

    println!("\n✔ 登録しました: {} ({}件目)", ledger_path.display(), count);
    Ok(())
}

/// 4項目を1つずつ確認・修正
fn prompt_fields(extracted: &FieldResult) -> Result<FieldResult> {
    let mut fields = extracted.clone();
    for field in Field::FORM_ORDER {
        let value: String = Input::new()
            .with_prompt(format!("{} {}", field, field_caption(field)))
            .with_initial_text(extracted.get(field))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NameplateError::Prompt(e.to_string()))?;
        fields.set(field, value.trim().to_string());
    }
    Ok(fields)
}

fn field_caption(field: Field) -> &'static str {
    match field {
        Field::Model => "Model",
        Field::Serial => "Serial",
        Field::Year => "Year",
        Field::Maker => "Maker",
    }
}

/// 倉庫を選択（「その他」は手入力）
fn prompt_warehouse(warehouses: &[String]) -> Result<String> {
    let mut items: Vec<&str> = warehouses.iter().map(String::as_str).collect();
    items.push(OTHER_WAREHOUSE);

    let selected = Select::new()
        .with_prompt("回収倉庫（営業所）")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| NameplateError::Prompt(e.to_string()))?;

    if items[selected] != OTHER_WAREHOUSE {
        return Ok(items[selected].to_string());
    }

    let input: String = Input::new()
        .with_prompt("倉庫名を入力")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| NameplateError::Prompt(e.to_string()))?;
    Ok(input.trim().to_string())
}

/// 引数 → 確認入力 → 既定値 の順に決める
fn optional_text(given: Option<&str>, default: &str, prompt: &str, assume_yes: bool) -> Result<String> {
    if let Some(value) = given {
        return Ok(value.trim().to_string());
    }
    if assume_yes {
        return Ok(default.to_string());
    }

    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(default)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| NameplateError::Prompt(e.to_string()))?;
    Ok(input.trim().to_string())
}

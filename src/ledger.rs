//! 回収台帳（xlsx）
//!
//! 1製品 = 1行。既存の行を calamine で読み、rust_xlsxwriter で新しい行を足して書き直す。
//!
//! 列: PickupDateTime, Warehouse, Model, Serial, Year, Maker, Note, RawText, Source

use crate::error::{NameplateError, Result};
use calamine::{open_workbook, Reader, Xlsx, XlsxError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nameplate_common::{Field, FieldResult};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 台帳シート名
pub const LEDGER_SHEET: &str = "回収記録";

/// 見出し行
pub const LEDGER_HEADERS: [&str; 9] = [
    "PickupDateTime",
    "Warehouse",
    "Model",
    "Serial",
    "Year",
    "Maker",
    "Note",
    "RawText",
    "Source",
];

/// xlsxの1セルに入る最大文字数
const CELL_CHAR_LIMIT: usize = 32_767;

const PICKUP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 回収記録1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    /// 回収日時
    pub pickup_at: Option<NaiveDateTime>,
    /// 回収倉庫（営業所）
    pub warehouse: String,
    /// 型番・製造番号・年式・メーカー（修正後）
    pub fields: FieldResult,
    /// 補足
    pub note: String,
    /// 統合OCRテキスト
    pub raw_text: String,
    /// 現場・担当者など
    pub source: String,
}

impl CollectionRecord {
    /// 保存条件: 回収日時・倉庫が入力済み かつ 型番・製造番号・メーカーのいずれか
    pub fn check_ready(&self) -> Result<()> {
        if self.pickup_at.is_none() {
            return Err(NameplateError::MissingPickupDateTime);
        }
        if self.warehouse.trim().is_empty() {
            return Err(NameplateError::MissingWarehouse);
        }
        let has_item = [Field::Model, Field::Serial, Field::Maker]
            .iter()
            .any(|f| self.fields.is_filled(*f));
        if !has_item {
            return Err(NameplateError::MissingItemField);
        }
        Ok(())
    }

    /// 台帳の1行
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.pickup_at
                .map(|dt| dt.format(PICKUP_FORMAT).to_string())
                .unwrap_or_default(),
            self.warehouse.clone(),
            self.fields.model.clone(),
            self.fields.serial.clone(),
            self.fields.year.clone(),
            self.fields.maker.clone(),
            self.note.clone(),
            self.raw_text.chars().take(CELL_CHAR_LIMIT).collect(),
            self.source.clone(),
        ]
    }
}

/// 回収日時を組み立てる
///
/// # Arguments
/// * `date` - `YYYY-MM-DD`（省略時は `today`）
/// * `time` - `HH:MM`
pub fn parse_pickup(date: Option<&str>, time: &str, today: NaiveDate) -> Result<NaiveDateTime> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|e| NameplateError::InvalidDateTime(format!("{} ({})", d, e)))?,
        None => today,
    };
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|e| NameplateError::InvalidDateTime(format!("{} ({})", time, e)))?;
    Ok(date.and_time(time))
}

/// 台帳の既存行（見出しを除く）を読み込む。ファイルが無ければ空
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: XlsxError| ledger_error(e))?;
    let range = workbook
        .worksheet_range(LEDGER_SHEET)
        .map_err(ledger_error)?;

    let rows = range
        .rows()
        .skip(1)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok(rows)
}

/// 1件追記する
///
/// # Returns
/// 追記後のデータ行数
pub fn append_record(path: &Path, record: &CollectionRecord) -> Result<usize> {
    record.check_ready()?;

    let mut rows = read_rows(path)?;
    rows.push(record.to_row());
    write_rows(path, &rows)?;

    debug!(path = %path.display(), rows = rows.len(), "台帳に追記");
    Ok(rows.len())
}

/// 書き込み途中の台帳（同じフォルダに置き、保存後に差し替える）
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(LEDGER_SHEET).map_err(ledger_error)?;

    for (col, header) in LEDGER_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(ledger_error)?;
    }
    worksheet.set_column_width(0, 18).map_err(ledger_error)?;
    worksheet.set_column_width(7, 40).map_err(ledger_error)?;

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet
                .write_string((r + 1) as u32, c as u16, value)
                .map_err(ledger_error)?;
        }
    }

    // 保存に失敗しても既存の台帳は残す
    let temp = temp_path(path);
    if let Err(e) = workbook.save(&temp) {
        let _ = std::fs::remove_file(&temp);
        return Err(ledger_error(e));
    }
    std::fs::rename(&temp, path)?;
    Ok(())
}

fn ledger_error(e: impl std::fmt::Display) -> NameplateError {
    NameplateError::Ledger(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CollectionRecord {
        CollectionRecord {
            pickup_at: parse_pickup(Some("2026-10-19"), "10:00", NaiveDate::MIN).ok(),
            warehouse: "本社倉庫（東京）".into(),
            fields: FieldResult {
                maker: "Panasonic".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_check_ready() {
        assert!(record().check_ready().is_ok());
    }

    #[test]
    fn test_check_ready_missing_pickup() {
        let r = CollectionRecord { pickup_at: None, ..record() };
        assert!(matches!(r.check_ready(), Err(NameplateError::MissingPickupDateTime)));
    }

    #[test]
    fn test_check_ready_missing_warehouse() {
        let r = CollectionRecord { warehouse: "  ".into(), ..record() };
        assert!(matches!(r.check_ready(), Err(NameplateError::MissingWarehouse)));
    }

    #[test]
    fn test_check_ready_year_only_is_not_enough() {
        let r = CollectionRecord {
            fields: FieldResult { year: "2019".into(), ..Default::default() },
            ..record()
        };
        assert!(matches!(r.check_ready(), Err(NameplateError::MissingItemField)));
    }

    #[test]
    fn test_to_row() {
        let row = record().to_row();
        assert_eq!(row.len(), LEDGER_HEADERS.len());
        assert_eq!(row[0], "2026-10-19 10:00");
        assert_eq!(row[5], "Panasonic");
    }

    #[test]
    fn test_to_row_truncates_raw_text() {
        let r = CollectionRecord { raw_text: "あ".repeat(CELL_CHAR_LIMIT + 10), ..record() };
        assert_eq!(r.to_row()[7].chars().count(), CELL_CHAR_LIMIT);
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(temp_path(Path::new("out/台帳.xlsx")), PathBuf::from("out/台帳.xlsx.tmp"));
    }

    #[test]
    fn test_failed_save_keeps_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.xlsx");
        append_record(&path, &record()).unwrap();

        // 一時ファイルの位置をフォルダで塞いで保存を失敗させる
        std::fs::create_dir(temp_path(&path)).unwrap();
        let result = append_record(&path, &record());

        assert!(matches!(result, Err(NameplateError::Ledger(_))));
        assert_eq!(read_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_pickup() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let dt = parse_pickup(None, "09:30", today).unwrap();
        assert_eq!(dt.format(PICKUP_FORMAT).to_string(), "2026-10-19 09:30");
        assert!(matches!(
            parse_pickup(Some("2026/10/19"), "09:30", today),
            Err(NameplateError::InvalidDateTime(_))
        ));
        assert!(parse_pickup(None, "25:00", today).is_err());
    }
}

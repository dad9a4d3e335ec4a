//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use nameplate_ocr::error::NameplateError;
use nameplate_ocr::shots;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = shots::scan_items(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(NameplateError::FolderNotFound(_))));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = shots::scan_items(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// テキスト以外のファイルしかないフォルダ
#[test]
fn test_scan_folder_no_text() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("label.jpg"), [0xFFu8, 0xD8]).unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    assert!(shots::scan_items(dir.path()).unwrap().is_empty());
}

/// NameplateErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        NameplateError::Config("テスト設定エラー".to_string()),
        NameplateError::FileNotFound("shot1.txt".to_string()),
        NameplateError::FolderNotFound("/path/to/folder".to_string()),
        NameplateError::NoShotsFound("標準入力".to_string()),
        NameplateError::MissingPickupDateTime,
        NameplateError::MissingWarehouse,
        NameplateError::MissingItemField,
        NameplateError::InvalidDateTime("25:00".to_string()),
        NameplateError::Ledger("シートがありません".to_string()),
        NameplateError::Prompt("入力中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 保存条件エラーのメッセージ確認
#[test]
fn test_missing_item_message() {
    let display = format!("{}", NameplateError::MissingItemField);
    assert!(display.contains("型番"));
    assert!(display.contains("メーカー"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: NameplateError = io_err.into();

    assert!(matches!(err, NameplateError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: NameplateError = json_err.into();

    assert!(matches!(err, NameplateError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = nameplate_common::Error::Config("メーカーの正式名が空です".to_string());
    let err: NameplateError = common_err.into();

    assert!(matches!(err, NameplateError::Common(_)));
    assert!(format!("{}", err).contains("メーカーの正式名が空です"));
}

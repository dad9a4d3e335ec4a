use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameplateError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("OCRテキストが見つかりません: {0}")]
    NoShotsFound(String),

    #[error("回収日時を選択してください")]
    MissingPickupDateTime,

    #[error("回収倉庫（営業所）を入力してください")]
    MissingWarehouse,

    #[error("型番・製造番号・メーカーのどれか1つ以上を入力してください")]
    MissingItemField,

    #[error("日時の形式が不正です: {0}")]
    InvalidDateTime(String),

    #[error("台帳エラー: {0}")]
    Ledger(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] nameplate_common::Error),
}

pub type Result<T> = std::result::Result<T, NameplateError>;

//! エラー型定義
//!
//! 抽出処理そのものは失敗しない（見つからない項目は空文字）。
//! ここで扱うのは語彙ファイルの読み込みエラーのみ。

use thiserror::Error;

/// 語彙読み込みのエラー
#[derive(Error, Debug)]
pub enum Error {
    #[error("語彙ファイルを読み込めません: {0}")]
    Io(#[from] std::io::Error),

    #[error("語彙JSONの形式が不正です: {0}")]
    Json(#[from] serde_json::Error),

    #[error("語彙設定エラー: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

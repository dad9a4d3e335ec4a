//! 家電回収の銘板読取ツール
//!
//! 抽出エンジンは `nameplate_common`、ここではファイル入力・一括処理・台帳登録を扱う。

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod register;
pub mod shots;

//! ログ出力の初期化
//!
//! 利用者向けの進捗表示は `println!`、内部の判定ログは `tracing` で標準エラーへ出す。

use tracing_subscriber::EnvFilter;

/// `--verbose` 指定時は debug、それ以外は `RUST_LOG`（未設定なら warn）
pub fn init(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("nameplate_ocr=debug,nameplate_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // テストなどで二重に初期化されても無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

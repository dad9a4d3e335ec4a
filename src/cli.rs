use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nameplate")]
#[command(about = "家電銘板OCRテキストから型番・製造番号・年式・メーカーを抽出し回収台帳に登録するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCRテキストから4項目を抽出
    Extract {
        /// 撮影ごとのOCRテキストファイル（省略時は標準入力）
        files: Vec<PathBuf>,

        /// 撮影ごとの抽出結果も表示
        #[arg(long)]
        per_shot: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 年式判定に使う「今年」を固定
        #[arg(long)]
        year: Option<i32>,
    },

    /// フォルダ内の製品をまとめて抽出
    Batch {
        /// OCRテキストのフォルダ（サブフォルダ = 1製品）
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/nameplates.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 年式判定に使う「今年」を固定
        #[arg(long)]
        year: Option<i32>,
    },

    /// 抽出結果を確認して回収台帳に登録
    Register {
        /// 撮影ごとのOCRテキストファイル（省略時は標準入力）
        files: Vec<PathBuf>,

        /// 回収倉庫（営業所）
        #[arg(short, long)]
        warehouse: Option<String>,

        /// 回収日 (YYYY-MM-DD、デフォルト: 今日)
        #[arg(long)]
        date: Option<String>,

        /// 回収時刻 (HH:MM、デフォルト: 設定値)
        #[arg(long)]
        time: Option<String>,

        /// 補足（読みにくい箇所、現場メモなど）
        #[arg(short, long)]
        note: Option<String>,

        /// Source（現場/倉庫/担当者名など）
        #[arg(short, long)]
        source: Option<String>,

        /// 台帳ファイル（xlsx）
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// 確認せずに登録
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 台帳ファイルを設定
        #[arg(long)]
        set_ledger: Option<PathBuf>,

        /// 回収倉庫を追加
        #[arg(long)]
        add_warehouse: Option<String>,

        /// 語彙ファイル（メーカー別名・除外語のJSON）を設定
        #[arg(long)]
        set_vocabulary: Option<PathBuf>,
    },
}

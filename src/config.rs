use crate::error::{NameplateError, Result};
use nameplate_common::Extractor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 台帳ファイル名の既定値
pub const DEFAULT_LEDGER_FILE: &str = "家電回収管理.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 回収台帳（xlsx）のパス。未設定ならカレントの `家電回収管理.xlsx`
    pub ledger_path: Option<PathBuf>,
    /// 回収倉庫（営業所）の選択肢
    pub warehouses: Vec<String>,
    /// Source欄の既定値
    pub default_source: String,
    /// 回収時刻の既定値（HH:MM）
    pub default_pickup_time: String,
    /// メーカー別名・除外語の追加定義（JSON）
    pub vocabulary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NameplateError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("nameplate-ocr").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            ledger_path: None,
            warehouses: vec![
                "本社倉庫（東京）".into(),
                "東日本センター（仙台）".into(),
                "西日本センター（大阪）".into(),
                "九州センター（福岡）".into(),
            ],
            default_source: String::new(),
            default_pickup_time: "10:00".into(),
            vocabulary_path: None,
        }
    }

    /// 台帳パス（未設定なら既定ファイル名）
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE))
    }

    /// 語彙設定を反映した抽出器
    pub fn extractor(&self) -> Result<Extractor> {
        match &self.vocabulary_path {
            Some(path) if !path.exists() => {
                Err(NameplateError::FileNotFound(path.display().to_string()))
            }
            Some(path) => Ok(Extractor::from_vocabulary_file(path)?),
            None => Ok(Extractor::new()),
        }
    }

    /// 倉庫を追加（重複は無視）。追加したら true
    pub fn add_warehouse(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.warehouses.iter().any(|w| w == name) {
            return false;
        }
        self.warehouses.push(name.to_string());
        true
    }
}

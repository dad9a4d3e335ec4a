//! 語彙の拡張設定
//!
//! メーカー別名と除外語をJSONで追加する。組み込みの表は常に優先される。
//!
//! ```json
//! {
//!   "makers": [{ "canonical": "Dyson", "aliases": ["DYSON", "ダイソン"] }],
//!   "badTokens": ["ECO-MODE"]
//! }
//! ```

use crate::error::{Error, Result};
use crate::maker::MakerEntry;
use serde::{Deserialize, Serialize};

/// 語彙の追加定義
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfig {
    /// 追加メーカー（組み込み表の後ろに追加）
    #[serde(default)]
    pub makers: Vec<MakerEntry>,
    /// 追加の除外語
    #[serde(default)]
    pub bad_tokens: Vec<String>,
}

impl VocabularyConfig {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for entry in &self.makers {
            if entry.canonical.trim().is_empty() {
                return Err(Error::Config("メーカーの正式名が空です".into()));
            }
            if entry.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "メーカー「{}」に別名がありません",
                    entry.canonical
                )));
            }
        }
        Ok(())
    }
}

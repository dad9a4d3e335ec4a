//! Nameplate Common Library
//!
//! 家電銘板のOCRテキストから メーカー・型番・製造番号・年式 を抽出するエンジン。
//! 入出力を持たない純粋関数のみで構成され、CLIや他のフロントエンドから共有される。
//!
//! ```
//! use nameplate_common::extract_fields;
//!
//! let result = extract_fields("Panasonic\n型番: NA-VX3800\nS/N:1234567890AB\n製造年:2019年");
//! assert_eq!(result.maker, "Panasonic");
//! assert_eq!(result.model, "NA-VX3800");
//! assert_eq!(result.serial, "1234567890AB");
//! assert_eq!(result.year, "2019");
//! ```

pub mod bad_tokens;
pub mod confusable;
pub mod error;
pub mod extractor;
pub mod maker;
pub mod model;
pub mod normalize;
pub mod serial;
pub mod types;
pub mod vocabulary;
pub mod year;

pub use bad_tokens::BadTokenSet;
pub use confusable::{correct_model_token, correct_serial_token};
pub use error::{Error, Result};
pub use extractor::{extract_fields, Extractor, YearClock};
pub use maker::{resolve_maker, AliasTable, MakerEntry};
pub use model::resolve_model;
pub use normalize::{normalize_lines, normalize_text};
pub use serial::resolve_serial;
pub use types::{aggregate_shots, Field, FieldResult, Shot, ShotExtraction};
pub use vocabulary::VocabularyConfig;
pub use year::{resolve_year, resolve_year_at, Era, ERAS};

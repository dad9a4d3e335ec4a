//! OCRテキストの読み込み
//!
//! 1ファイル = 1回の撮影（OCRの認識行を改行区切りで保存したもの）。
//! フォルダ直下の `*.txt` は1製品分、サブフォルダは1フォルダ = 1製品として扱う。

use crate::error::{NameplateError, Result};
use nameplate_common::Shot;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEXT_EXTENSIONS: &[&str] = &["txt", "TXT"];

/// 1製品分の撮影
#[derive(Debug, Clone)]
pub struct ItemShots {
    /// 製品名（フォルダ名）
    pub item: String,
    pub shots: Vec<Shot>,
}

/// テキストファイルを撮影順に読み込む
pub fn load_shot_files(paths: &[PathBuf]) -> Result<Vec<Shot>> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            if !path.is_file() {
                return Err(NameplateError::FileNotFound(path.display().to_string()));
            }
            let text = std::fs::read_to_string(path)?;
            Ok(Shot::new(i + 1, text.trim_end()))
        })
        .collect()
}

/// 標準入力を1回分の撮影として読み込む
pub fn read_stdin_shot() -> Result<Vec<Shot>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Shot::new(1, text.trim_end())])
}

/// フォルダ直下のテキストファイルを名前順に列挙
pub fn scan_shot_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(NameplateError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_text_file(p))
        .collect();

    files.sort();
    Ok(files)
}

/// フォルダを製品単位に分けて読み込む
///
/// 直下の `*.txt` があればフォルダ自身を1製品、各サブフォルダもそれぞれ1製品とする。
/// テキストが1つもない製品は含めない。
pub fn scan_items(folder: &Path) -> Result<Vec<ItemShots>> {
    if !folder.exists() {
        return Err(NameplateError::FolderNotFound(folder.display().to_string()));
    }

    let mut items = Vec::new();

    let root_files = scan_shot_files(folder)?;
    if !root_files.is_empty() {
        items.push(ItemShots {
            item: dir_name(folder),
            shots: load_shot_files(&root_files)?,
        });
    }

    let mut subdirs: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_dir())
        .collect();
    subdirs.sort();

    for dir in subdirs {
        let files = scan_shot_files(&dir)?;
        if files.is_empty() {
            continue;
        }
        items.push(ItemShots {
            item: dir_name(&dir),
            shots: load_shot_files(&files)?,
        });
    }

    Ok(items)
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| TEXT_EXTENSIONS.iter().any(|&e| e == ext.to_string_lossy()))
        .unwrap_or(false)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

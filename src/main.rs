use clap::Parser;
use nameplate_common::{Extractor, Field, FieldResult, Shot};
use nameplate_ocr::{batch, cli, config, error, logging, register, shots};
use cli::{Cli, Commands};
use config::Config;
use error::{NameplateError, Result};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { files, per_shot, json, year } => {
            let shots = load_shots(&files)?;
            let extractor = with_year(config.extractor()?, year);
            let extraction = batch::extract_shots_parallel(&extractor, &shots);

            if json {
                let output = if per_shot {
                    serde_json::to_string_pretty(&extraction)?
                } else {
                    serde_json::to_string_pretty(&extraction.aggregate)?
                };
                println!("{}", output);
                return Ok(());
            }

            if per_shot {
                for (shot, fields) in shots.iter().zip(&extraction.per_shot) {
                    println!("[SHOT {}]", shot.index);
                    print_fields(fields);
                    println!();
                }
                println!("[統合]");
            }
            print_fields(&extraction.aggregate);
            println!("\n抽出進捗: {}", extraction.aggregate.progress_line());
        }

        Commands::Batch { folder, output, year } => {
            println!("📷 nameplate - 一括抽出\n");

            println!("[1/3] OCRテキストをスキャン中...");
            let items = shots::scan_items(&folder)?;
            if items.is_empty() {
                return Err(NameplateError::NoShotsFound(folder.display().to_string()));
            }
            println!("✔ {}製品を検出\n", items.len());

            println!("[2/3] 抽出中...");
            let extractor = with_year(config.extractor()?, year);
            let results = batch::extract_items(&items, &extractor, true);
            let counts = batch::fill_counts(&results);
            let summary = Field::FORM_ORDER
                .iter()
                .zip(counts)
                .map(|(field, count)| format!("{} {}/{}", field, count, results.len()))
                .collect::<Vec<_>>()
                .join(" / ");
            println!("✔ 抽出完了: {}\n", summary);

            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| folder.join("nameplates.json"));
            batch::write_results(&output, &results)?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 完了");
        }

        Commands::Register { files, warehouse, date, time, note, source, ledger, yes } => {
            println!("📷 nameplate - 回収登録\n");

            let shots = load_shots(&files)?;
            let extractor = config.extractor()?;
            let options = register::RegisterOptions {
                warehouse,
                date,
                time,
                note,
                source,
                ledger,
                assume_yes: yes,
            };
            register::run_register(&shots, &options, &config, &extractor)?;
        }

        Commands::Config { show, set_ledger, add_warehouse, set_vocabulary } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_ledger {
                config.ledger_path = Some(path);
                changed = true;
            }
            if let Some(name) = add_warehouse {
                if config.add_warehouse(&name) {
                    changed = true;
                } else {
                    println!("倉庫は追加されませんでした（空または登録済み）: {}", name);
                }
            }
            if let Some(path) = set_vocabulary {
                // 読み込めることを確認してから保存
                nameplate_common::VocabularyConfig::from_file(&path)?;
                config.vocabulary_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  台帳: {}", config.ledger_path().display());
                println!("  倉庫: {}", config.warehouses.join(", "));
                println!("  回収時刻の既定値: {}", config.default_pickup_time);
                println!("  Source既定値: {}", config.default_source);
                println!(
                    "  語彙ファイル: {}",
                    config
                        .vocabulary_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
            }
        }
    }

    Ok(())
}

/// ファイル指定があれば読み込み、なければ標準入力
fn load_shots(files: &[PathBuf]) -> Result<Vec<Shot>> {
    let shots = if files.is_empty() {
        shots::read_stdin_shot()?
    } else {
        shots::load_shot_files(files)?
    };
    if shots.is_empty() {
        return Err(NameplateError::NoShotsFound("標準入力".into()));
    }
    Ok(shots)
}

fn with_year(extractor: Extractor, year: Option<i32>) -> Extractor {
    match year {
        Some(y) => extractor.with_current_year(y),
        None => extractor,
    }
}

fn print_fields(fields: &FieldResult) {
    for field in Field::FORM_ORDER {
        let value = fields.get(field);
        println!("  {}: {}", field, if value.is_empty() { "-" } else { value });
    }
}

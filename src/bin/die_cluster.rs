use die_cluster::adapter::{self, InputKind};
use die_cluster::classify::{classify, ThresholdTable};
use die_cluster::config::run::parse_cli;
use die_cluster::config::{load_thresholds, RunConfig};
use die_cluster::report::{save_wafer_png, summarize};
use log::{info, warn};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "die_cluster".to_string());
    let config = parse_cli(&program)?;

    // one table per run, shared read-only by every file
    let table = load_thresholds(&config.thresholds_path)?;
    info!(
        "loaded threshold table with {} entries from {}",
        table.len(),
        config.thresholds_path.display()
    );

    if config.batch {
        process_directory(&config, &table)
    } else {
        process_file(&config, &table, &config.input_path)
    }
}

/// Process every supported file in the input directory. Files are
/// independent; one bad wafer does not stop the batch.
fn process_directory(config: &RunConfig, table: &ThresholdTable) -> Result<(), String> {
    let entries = fs::read_dir(&config.input_path)
        .map_err(|e| format!("Failed to read {}: {e}", config.input_path.display()))?;
    let mut processed = 0usize;
    let mut failures = 0usize;
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to list {}: {e}", config.input_path.display()))?;
        let path = entry.path();
        if !path.is_file() || InputKind::from_path(&path).is_err() {
            continue;
        }
        match process_file(config, table, &path) {
            Ok(()) => processed += 1,
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                eprintln!("Error in {}: {err}", path.display());
                failures += 1;
            }
        }
    }
    if processed == 0 && failures == 0 {
        return Err(format!(
            "No .txt or .stdf files in {}",
            config.input_path.display()
        ));
    }
    println!("Processed {processed} wafer files ({failures} failed)");
    Ok(())
}

fn process_file(config: &RunConfig, table: &ThresholdTable, path: &Path) -> Result<(), String> {
    info!("processing {}", path.display());
    let (grid, template) = adapter::parse_file(path)?;
    let classified = classify(&grid, table).map_err(|e| format!("{}: {e}", path.display()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("wafer");
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("Failed to create {}: {e}", config.output_dir.display()))?;

    let summary = summarize(&grid, &classified);
    let summary_path = config.output_dir.join(format!("{stem}_summary.txt"));
    fs::write(&summary_path, summary.to_text())
        .map_err(|e| format!("Failed to write {}: {e}", summary_path.display()))?;
    adapter::write_json_file(
        &config.output_dir.join(format!("{stem}_summary.json")),
        &summary,
    )?;

    if config.render {
        save_wafer_png(&grid, &config.output_dir.join(format!("{stem}_before.png")))?;
        save_wafer_png(
            &classified,
            &config.output_dir.join(format!("{stem}_after.png")),
        )?;
    }

    let result_text = template.render(&classified.to_string());
    let result_path = adapter::write_result(&config.output_dir, path, &result_text)?;

    println!("{}", path.display());
    println!(
        "  tested={} failed={} passed={} predicted_failures={}",
        summary.tested_dies, summary.failed, summary.passed, summary.predicted_failures
    );
    println!("  result written to {}", result_path.display());
    Ok(())
}

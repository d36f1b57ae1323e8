//! Command-line configuration for the `die_cluster` binary.

use std::env;
use std::path::PathBuf;

/// Resolved command-line arguments.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Wafer map file (`.txt` or `.stdf`), or a directory in batch mode.
    pub input_path: PathBuf,
    /// Directory receiving results, summaries and renderings.
    pub output_dir: PathBuf,
    /// JSON neighbor threshold table.
    pub thresholds_path: PathBuf,
    /// Also write before/after PNG renderings of the wafer.
    pub render: bool,
    /// Treat `input_path` as a directory and process every supported file.
    pub batch: bool,
}

/// Parse `env::args` into a [`RunConfig`].
pub fn parse_cli(program: &str) -> Result<RunConfig, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut render = false;
    let mut batch = false;
    for argument in env::args().skip(1) {
        if argument == "--render" {
            render = true;
        } else if argument == "--dir" {
            batch = true;
        } else if argument == "-h" || argument == "--help" {
            return Err(usage(program));
        } else if argument.starts_with('-') {
            return Err(format!("Unknown flag '{argument}'\n{}", usage(program)));
        } else {
            positional.push(PathBuf::from(argument));
        }
    }
    let [input_path, output_dir, thresholds_path]: [PathBuf; 3] = positional
        .try_into()
        .map_err(|_| usage(program))?;

    let config = RunConfig {
        input_path,
        output_dir,
        thresholds_path,
        render,
        batch,
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &RunConfig) -> Result<(), String> {
    if !config.input_path.exists() {
        return Err(format!(
            "Input path {} does not exist",
            config.input_path.display()
        ));
    }
    if config.batch && !config.input_path.is_dir() {
        return Err(format!(
            "--dir expects a directory, got {}",
            config.input_path.display()
        ));
    }
    if !config.batch && config.input_path.is_dir() {
        return Err(format!(
            "{} is a directory; pass --dir to process a whole directory",
            config.input_path.display()
        ));
    }
    if !config.thresholds_path.is_file() {
        return Err(format!(
            "Thresholds path {} is not a file",
            config.thresholds_path.display()
        ));
    }
    if config.output_dir.is_file() {
        return Err(format!(
            "Output path {} is a file; expected a directory",
            config.output_dir.display()
        ));
    }
    Ok(())
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <input.(txt|stdf)> <output-dir> <thresholds.json> [--render] [--dir]"
    )
}

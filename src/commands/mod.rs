//! CLI commands for kohya-tweaks

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::{load_settings, save_settings, AppPaths, Settings};
use crate::document::to_pretty_json;
use crate::model::{self, ConfigModel, Status};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Write the default settings file
pub fn init() -> Result<()> {
    let paths = AppPaths::new()?;

    if paths.is_initialized() {
        println!("kohya-tweaks is already initialized at {}", paths.root.display());
        return Ok(());
    }

    let settings = Settings::default();
    save_settings(&paths, &settings)?;

    println!("Initialized kohya-tweaks at {}", paths.root.display());
    println!("  Created config.toml");
    println!("  Saved configs go to: {}", settings.output.dir.display());
    println!();
    println!("Next steps:");
    println!("  kohya-tweaks show <config.json>       Summarize a config");
    println!("  kohya-tweaks edit <config.json>       Tweak a config interactively");

    Ok(())
}

/// Current settings, or defaults when none were written yet
pub fn settings() -> Result<Settings> {
    let paths = AppPaths::new()?;
    load_settings(&paths)
}

/// Show a config as a summary or raw JSON
pub fn show(path: &Path, format: OutputFormat) -> Result<()> {
    let (doc, status) = model::load(path);
    check(&status)?;

    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(&doc)?),
        OutputFormat::Summary => {
            println!("{}", status);
            println!();
            println!("{}", model::summarize(&doc));
        }
    }
    Ok(())
}

/// Apply daily tweaks to a config and optionally save the result.
///
/// `save` is `None` to skip saving, `Some(None)` to save under the
/// suggested name, and `Some(Some(name))` to save under `name`.
pub fn tweak(
    path: &Path,
    edits: &[(String, String)],
    save: Option<Option<String>>,
    output_dir: &Path,
) -> Result<()> {
    let (model, status, _) = ConfigModel::new().set_base(path);
    check(&status)?;
    println!("{}", status);

    let (model, status) = model.update_tweaks(edits.iter().map(|(k, v)| (k, v)));
    check(&status)?;
    println!("{}", status);
    println!();
    println!("{}", model.summary());

    if let Some(name) = save {
        let filename = name.unwrap_or_else(|| model.suggest_filename());
        let status = model.save(&filename, output_dir);
        println!();
        println!("{}", status);
        check(&status)?;
    }
    Ok(())
}

/// Compare two configs
pub fn compare(base: &Path, other: &Path) -> Result<()> {
    println!("{}", model::compare_files(base, other));
    Ok(())
}

/// Print the filename a config would be saved under
pub fn suggest(path: &Path) -> Result<()> {
    let (model, status, _) = ConfigModel::new().set_base(path);
    check(&status)?;
    println!("{}", model.suggest_filename());
    Ok(())
}

/// Parse a `key=value` argument
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid assignment: {}. Use: key=value", arg)),
    }
}

fn check(status: &Status) -> Result<()> {
    if let Some(e) = status.error() {
        bail!("{}", e);
    }
    Ok(())
}

//! Show or initialize configuration.

use std::path::PathBuf;

use flingkey_common::config::{config_file_path, AppConfig};

pub fn run(
    config: &AppConfig,
    path: Option<PathBuf>,
    init: bool,
    force: bool,
) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);

    if !init {
        println!("# {}", path.display());
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    tracing::info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}

use anyhow::{Context, Result};

use kbdesk_core::AppConfig;
use kbdesk_tui::available_themes;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            AppConfig::default()
                .save()
                .context("Failed to write default config")?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("# {}", path.display());
    println!("# log file: {}", config.log_path().display());
    println!("# themes: {}\n", available_themes().join(", "));
    print!("{}", config.to_toml()?);

    Ok(())
}

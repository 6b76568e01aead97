use std::path::Path;

use anyhow::Result;

use folio_core::AppConfig;

/// Print the effective configuration (loaded from `source`) or the defaults
pub fn run(config: &AppConfig, source: &Path, default: bool) -> Result<()> {
    if default {
        print!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    if source.exists() {
        println!("# {}", source.display());
    } else {
        println!("# {} (not found, using defaults)", source.display());
    }
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Write the built-in defaults to the default config path
pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

//! Initialize .diagsnap.toml configuration

use crate::session::DEFAULT_FEED_FILE;
use anyhow::Result;
use diagsnap_core::{DiagsnapConfig, CONFIG_FILE};
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILE, config_path);
        return Ok(());
    }

    let config = DiagsnapConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILE, config_path);
    println!("\nPoint your editor bridge at {} and run:", DEFAULT_FEED_FILE);
    println!("  diagsnap watch");

    Ok(())
}

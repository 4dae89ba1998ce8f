//! `restry config` – print the effective configuration.

use anyhow::Result;
use restry_core::RestConfig;
use std::path::Path;

pub fn run_config(path: &Path, cfg: &RestConfig) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

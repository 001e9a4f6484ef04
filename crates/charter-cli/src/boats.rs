//! Boat registry file.
//!
//! ```toml
//! [[boats]]
//! name = "조커호"
//! url = "https://jokerho.sunsang24.com"
//! city = "보령"
//! port = "오천항"
//! ```

use anyhow::Context;
use charter_core::Boat;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BoatFile {
    #[serde(default)]
    boats: Vec<Boat>,
}

pub fn load_boats(path: &Path) -> anyhow::Result<Vec<Boat>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading boat registry {}", path.display()))?;
    parse_boats(&contents).with_context(|| format!("parsing boat registry {}", path.display()))
}

pub fn parse_boats(contents: &str) -> anyhow::Result<Vec<Boat>> {
    let file: BoatFile = toml::from_str(contents)?;
    Ok(file.boats)
}

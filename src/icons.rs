//! The icon set placed on the grid.
//!
//! Order is significant: the icon at index `i` lands in row `i / 4`,
//! column `i % 4`.

use crate::{color::Rgb, layout::ICON_COUNT};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconSpec {
    /// Identifier used to build the source filename.
    pub name: String,
    /// Caption drawn beneath the icon.
    pub label: String,
    /// Accent color. Carried as data only, never rendered.
    pub color: Rgb,
}

impl IconSpec {
    pub fn new(name: &str, label: &str, color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            color,
        }
    }

    /// File name of the pre-rendered source image, e.g. `icon_play_2048.png`.
    pub fn file_name(&self) -> String {
        format!("icon_{}_2048.png", self.name)
    }

    pub fn source_path(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(self.file_name())
    }
}

pub type IconSet = [IconSpec; ICON_COUNT];

const PINK: Rgb = Rgb::new(0xFF, 0x5D, 0xA2);
const ORANGE: Rgb = Rgb::new(0xFF, 0xB3, 0x47);
const TEAL: Rgb = Rgb::new(0x39, 0xE0, 0xC1);
const VIOLET: Rgb = Rgb::new(0x7C, 0x4D, 0xFF);

pub fn default_icons() -> IconSet {
    [
        IconSpec::new("play", "Play", PINK),
        IconSpec::new("shop", "Shop", ORANGE),
        IconSpec::new("wallet", "Wallet", TEAL),
        IconSpec::new("quests", "Quests", VIOLET),
        IconSpec::new("profile", "Profile", PINK),
        IconSpec::new("settings", "Settings", ORANGE),
        IconSpec::new("cash_out", "Cash Out", TEAL),
        IconSpec::new("sound", "Sound", VIOLET),
    ]
}

/// Parse an icon set from a JSON array of `{ "name", "label", "color" }` objects.
pub fn parse_icon_set(json: &str) -> Result<IconSet> {
    let icons: Vec<IconSpec> = serde_json::from_str(json).context("Invalid icon set JSON")?;
    let count = icons.len();

    icons.try_into().map_err(|_| {
        anyhow::anyhow!("Icon set must contain exactly {ICON_COUNT} icons, found {count}")
    })
}

pub fn load_icon_set(path: &Path) -> Result<IconSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read icon set {}", path.display()))?;

    parse_icon_set(&json).with_context(|| format!("Failed to load icon set {}", path.display()))
}

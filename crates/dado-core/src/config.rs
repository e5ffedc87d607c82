//! Configuration model (`config.toml`).
//!
//! ```toml
//! roll_sound = "sounds/roll.mp3"
//! max_dice_per_roll = 50
//!
//! [[die]]
//! label = "D20"
//! sides = 20
//! image = "https://example.com/d20.png"
//! ```
//!
//! Every key is optional. Without `[[die]]` tables the six standard dice are
//! used.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::dice::{DiceSet, DieSpec, STANDARD_DICE};
use crate::error::{DiceError, Result};

pub const DEFAULT_MAX_DICE_PER_ROLL: u32 = 100;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RootConfig {
    /// Resource played on every roll.
    pub roll_sound: Option<String>,
    /// Overrides the default history location.
    pub history_file: Option<PathBuf>,
    /// Upper bound on dice drawn by a single roll or sum.
    pub max_dice_per_roll: u32,
    #[serde(rename = "die")]
    pub dice: Vec<DieConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DieConfig {
    pub label: String,
    pub sides: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            roll_sound: None,
            history_file: None,
            max_dice_per_roll: DEFAULT_MAX_DICE_PER_ROLL,
            dice: STANDARD_DICE
                .iter()
                .map(|&(label, sides)| DieConfig {
                    label: label.to_string(),
                    sides,
                    image: None,
                })
                .collect(),
        }
    }
}

impl RootConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RootConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_dice_per_roll == 0 {
            return Err(DiceError::config("max_dice_per_roll must be at least 1"));
        }
        self.dice_set().map(|_| ())
    }

    /// The configured dice, in file order.
    pub fn dice_set(&self) -> Result<DiceSet> {
        let specs = self
            .dice
            .iter()
            .map(|d| {
                DieSpec::new(d.label.trim(), d.sides).map_err(|e| {
                    DiceError::config(format!("die '{}': {}", d.label, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        DiceSet::from_specs(specs)
    }

    pub fn asset_catalog(&self) -> AssetCatalog {
        let catalog = self
            .dice
            .iter()
            .filter_map(|d| d.image.as_deref().map(|image| (d.label.trim(), image)))
            .fold(AssetCatalog::new(), |catalog, (label, image)| {
                catalog.with_image(label, image)
            });

        match self.roll_sound.as_deref() {
            Some(sound) => catalog.with_roll_sound(sound),
            None => catalog,
        }
    }
}

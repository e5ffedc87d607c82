//! Asset references for the presentation layer.
//!
//! dado never opens these resources. It only keeps track of which image
//! belongs to which die and which sound accompanies a roll, so a front end
//! can fetch them however it likes.

use std::fmt;
use std::path::PathBuf;

/// Where a resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Local(PathBuf),
    Remote(String),
}

impl AssetSource {
    /// `http://` and `https://` references are remote, anything else is a path.
    pub fn parse(resource: &str) -> Self {
        let trimmed = resource.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Die label to image mapping plus the roll sound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    images: Vec<(String, AssetSource)>,
    roll_sound: Option<AssetSource>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, label: impl Into<String>, resource: &str) -> Self {
        self.images.push((label.into(), AssetSource::parse(resource)));
        self
    }

    pub fn with_roll_sound(mut self, resource: &str) -> Self {
        self.roll_sound = Some(AssetSource::parse(resource));
        self
    }

    /// Image for a die, matched case-insensitively.
    pub fn image_for(&self, label: &str) -> Option<&AssetSource> {
        self.images
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, source)| source)
    }

    pub fn roll_sound(&self) -> Option<&AssetSource> {
        self.roll_sound.as_ref()
    }
}

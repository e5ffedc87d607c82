//! Error types for dado.

use thiserror::Error;

/// A shared error type for every dado crate.
///
/// Structured variants with automatic conversion from the I/O and
/// serialization errors the storage layer produces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    /// A die was described with zero sides.
    #[error("Invalid die size: {sides} (a die needs at least one side)")]
    InvalidSides { sides: u32 },

    /// A die label that is not part of the configured dice set.
    #[error("Unknown die: '{label}'")]
    UnknownDie { label: String },

    /// A single request asked for more dice than the configured cap.
    #[error("Too many dice: {requested} requested, at most {max} allowed")]
    TooManyDice { requested: u64, max: u32 },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DiceError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownDie error
    pub fn unknown_die(label: impl Into<String>) -> Self {
        Self::UnknownDie {
            label: label.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DiceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DiceError>`.
pub type Result<T> = std::result::Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: DiceError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion() {
        let parse_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: DiceError = parse_err.into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DiceError::unknown_die("D7").to_string(),
            "Unknown die: 'D7'"
        );
        assert_eq!(
            DiceError::TooManyDice {
                requested: 500,
                max: 100
            }
            .to_string(),
            "Too many dice: 500 requested, at most 100 allowed"
        );
    }
}

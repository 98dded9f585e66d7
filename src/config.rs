//! Board configuration.
//!
//! [`BoardConfig`] holds the values the layout and the renderer must agree
//! on. It deserializes from TOML; every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```
//! use u_board::config::BoardConfig;
//!
//! let config = BoardConfig::from_toml_str("[layout]\narrow_width = 12\n").unwrap();
//! assert_eq!(config.layout().arrow_width(), 12);
//! assert_eq!(BoardConfig::default().layout().arrow_width(), 16);
//! ```

use std::{fs, path::Path};

use log::info;
use serde::Deserialize;

use crate::board::{LaneAllocator, ARROW_WIDTH};
use crate::error::BoardError;

/// Top-level board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

/// Link layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    /// Width of one link lane in pixels.
    #[serde(default = "default_arrow_width")]
    arrow_width: u32,
}

fn default_arrow_width() -> u32 {
    ARROW_WIDTH
}

impl BoardConfig {
    /// Creates a configuration from its sections.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Lane allocator matching this configuration.
    pub fn allocator(&self) -> LaneAllocator {
        LaneAllocator::new(self.layout.arrow_width)
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    /// [`BoardError::Config`] if the TOML is malformed or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, BoardError> {
        let config: Self =
            toml::from_str(content).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), BoardError> {
        if self.layout.arrow_width == 0 {
            return Err(BoardError::Config(
                "layout.arrow_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl LayoutConfig {
    /// Creates a layout section with the given lane width.
    pub fn new(arrow_width: u32) -> Self {
        Self { arrow_width }
    }

    /// Width of one link lane in pixels.
    pub fn arrow_width(&self) -> u32 {
        self.arrow_width
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(ARROW_WIDTH)
    }
}

/// Loads configuration from an optional TOML file.
///
/// Without a path the default configuration is used.
///
/// # Errors
/// I/O errors reading the file, or [`BoardError::Config`] when it does not
/// parse.
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<BoardConfig, BoardError> {
    match path {
        Some(path) => {
            let path = path.as_ref();
            info!(path = path.display().to_string(); "Loading configuration");
            let content = fs::read_to_string(path)?;
            BoardConfig::from_toml_str(&content)
        }
        None => Ok(BoardConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.layout().arrow_width(), ARROW_WIDTH);
    }

    #[test]
    fn test_empty_section_uses_defaults() {
        let config = BoardConfig::from_toml_str("[layout]\n").unwrap();
        assert_eq!(config.layout().arrow_width(), ARROW_WIDTH);
    }

    #[test]
    fn test_custom_width_reaches_allocator() {
        let config = BoardConfig::from_toml_str("[layout]\narrow_width = 20\n").unwrap();
        assert_eq!(config.allocator().arrow_width(), 20);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = BoardConfig::from_toml_str("[layout]\narrow_width = 0\n").unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = BoardConfig::from_toml_str("[layout\n").unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_load_without_path() {
        let config = load_config(None::<&Path>).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Some("/nonexistent/u-board.toml")).unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }
}

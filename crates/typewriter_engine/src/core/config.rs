//! # Unified Configuration System
//!
//! Collects the settings of every subsystem into one [`TypewriterConfig`]
//! that can be loaded from TOML or RON.
//!
//! ## Configuration Categories
//!
//! - **Timing**: Reveal interval, post-line delay, markup delimiter
//! - **Layout**: Text box geometry and spacing
//! - **Animation**: Glyph motion and fade constants
//! - **Atlas**: Cell grid of the bitmap font

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::animation::AnimationSettings;
use crate::text::{AtlasLayout, LayoutSettings, DEFAULT_DELIMITER};

/// # Timing Configuration
///
/// Pace of the typewriter reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Seconds per displayed glyph at speed 1
    pub base_interval: f32,
    /// Seconds a finished line stays on screen before fading
    pub post_display_delay: f32,
    /// Character that opens and closes inline commands
    pub delimiter: char,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            base_interval: 0.05,
            post_display_delay: 1.5,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl TimingSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_interval.is_finite() || self.base_interval < 0.0 {
            return Err(format!("Base interval must be a non-negative number, got {}", self.base_interval));
        }
        if !self.post_display_delay.is_finite() || self.post_display_delay < 0.0 {
            return Err(format!(
                "Post-display delay must be a non-negative number, got {}",
                self.post_display_delay
            ));
        }
        if matches!(self.delimiter, '=' | ',' | ' ') {
            return Err(format!("Delimiter {:?} is reserved by the command grammar", self.delimiter));
        }
        Ok(())
    }
}

/// # Complete Typewriter Configuration
///
/// Top-level configuration handed to the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Reveal timing
    pub timing: TimingSettings,
    /// Text box layout
    pub layout: LayoutSettings,
    /// Glyph animation
    pub animation: AnimationSettings,
    /// Font atlas grid
    pub atlas: AtlasLayout,
}

impl TypewriterConfig {
    /// Set timing settings
    pub fn with_timing(mut self, timing: TimingSettings) -> Self {
        self.timing = timing;
        self
    }

    /// Set layout settings
    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    /// Set animation settings
    pub fn with_animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    /// Fix the shake seed for reproducible playback
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.animation.seed = Some(seed);
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate().map_err(ConfigError::Invalid)?;
        self.layout.validate().map_err(ConfigError::Invalid)?;
        self.animation.validate().map_err(ConfigError::Invalid)?;
        self.atlas.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Config for TypewriterConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("typewriter_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_is_valid() {
        assert!(TypewriterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_timing() {
        let config = TypewriterConfig::default().with_timing(TimingSettings {
            base_interval: -1.0,
            ..TimingSettings::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = TypewriterConfig::default().with_timing(TimingSettings {
            delimiter: ',',
            ..TimingSettings::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("round_trip.toml");
        let config = TypewriterConfig::default().with_seed(42);
        config.save_to_file(&path).unwrap();
        let loaded = TypewriterConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("round_trip.ron");
        let config = TypewriterConfig::default();
        config.save_to_file(&path).unwrap();
        let loaded = TypewriterConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_largest_seed_round_trips_through_toml() {
        let path = temp_path("max_seed.toml");
        let config = TypewriterConfig::default().with_seed(u32::MAX);
        config.save_to_file(&path).unwrap();
        let loaded = TypewriterConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.animation.seed, Some(u32::MAX));
    }

    #[test]
    fn test_partial_atlas_table_uses_defaults() {
        let config: TypewriterConfig = toml::from_str("[atlas]\ncell_width = 8\n").unwrap();
        assert_eq!(config.atlas.cell_width, 8);
        assert_eq!(config.atlas.sheet_width, AtlasLayout::default().sheet_width);
        assert_eq!(config.atlas.total_characters, 68);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TypewriterConfig = toml::from_str("[timing]\nbase_interval = 0.1\n").unwrap();
        assert_eq!(config.timing.base_interval, 0.1);
        assert_eq!(config.timing.delimiter, DEFAULT_DELIMITER);
        assert_eq!(config.layout, LayoutSettings::default());
    }
}

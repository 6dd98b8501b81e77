//! Per-glyph animation
//!
//! Every glyph carries a [`GlyphMotion`] chosen from its animation style at
//! placement time and, once its line is over, a [`Fade`]. Motion only ever
//! writes the glyph's offset from its layout position; the fade only ever
//! writes alpha.

pub mod fade;
pub mod motion;

pub use fade::*;
pub use motion::*;

use serde::{Deserialize, Serialize};

/// Tuning constants for glyph motion and fade-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Vertical amplitude of wiggle and sine motion, in pixels
    pub sin_amplitude: f32,
    /// Angular frequency of wiggle and sine motion, in radians per second
    pub sin_frequency: f32,
    /// Seconds a gravity glyph hangs before falling
    pub gravity_delay: f32,
    /// Vertical acceleration once falling, in pixels per second squared
    pub gravity_acceleration: f32,
    /// Seconds a gravity glyph falls before fading out on its own
    pub gravity_lifetime: Option<f32>,
    /// Seconds between new shake directions
    pub shake_interval: f32,
    /// Fraction of the remaining distance covered per tick while shaking
    pub shake_speed: f32,
    /// Shake radius in pixels
    pub shake_amplitude: f32,
    /// Seconds for a glyph to fade from its current alpha to zero
    pub fade_duration: f32,
    /// Seed for shaking glyphs; `None` draws from system entropy.
    ///
    /// Limited to 32 bits so it always fits a TOML integer.
    pub seed: Option<u32>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            sin_amplitude: 2.0,
            sin_frequency: 10.0,
            gravity_delay: 1.0,
            gravity_acceleration: -98.1,
            gravity_lifetime: Some(2.0),
            shake_interval: 0.25,
            shake_speed: 0.25,
            shake_amplitude: 5.0,
            fade_duration: 0.5,
            seed: None,
        }
    }
}

impl AnimationSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.fade_duration.is_nan() || self.fade_duration <= 0.0 {
            return Err(format!("Fade duration must be positive, got {}", self.fade_duration));
        }
        if self.shake_interval < 0.0 || self.gravity_delay < 0.0 {
            return Err("Animation delays cannot be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.shake_speed) {
            return Err(format!("Shake speed must be in 0..=1, got {}", self.shake_speed));
        }
        if self.gravity_lifetime.is_some_and(|lifetime| lifetime < 0.0) {
            return Err("Gravity lifetime cannot be negative".to_string());
        }
        Ok(())
    }
}

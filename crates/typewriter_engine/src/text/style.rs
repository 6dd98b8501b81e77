//! Live text style applied to newly placed glyphs

use serde::{Deserialize, Serialize};

use super::command::CommandEffect;
use crate::foundation::math::Color;

/// Per-glyph motion selected by the `anim` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationStyle {
    /// Glyph stays where layout put it
    #[default]
    None,
    /// Circular bob around the layout position
    Wiggle,
    /// Vertical sine bob
    SineWave,
    /// Eases toward a new random direction at a fixed interval
    Shaking,
    /// Falls after a short delay
    Gravity,
}

/// Color, scale, speed and animation applied to the next glyph.
///
/// Glyphs snapshot the style when they are placed, so later commands never
/// restyle glyphs already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    /// Glyph tint
    pub color: Color,
    /// Uniform glyph scale, never negative
    pub scale: f32,
    /// Reveal speed multiplier, always positive
    pub speed: f32,
    /// Motion for new glyphs
    pub animation_style: AnimationStyle,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            scale: 1.0,
            speed: 1.0,
            animation_style: AnimationStyle::None,
        }
    }
}

impl StyleState {
    /// Restore the defaults used at the start of every dialogue line
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a style command.
    ///
    /// Returns `false` when the value was rejected and the style is unchanged.
    /// `NewLine` is a layout effect and leaves the style untouched.
    pub fn apply(&mut self, effect: CommandEffect) -> bool {
        match effect {
            CommandEffect::NewLine => true,
            CommandEffect::Color(color) => {
                if !color.is_finite() {
                    log::warn!("Ignoring non-finite color {:?}", color);
                    return false;
                }
                self.color = color;
                true
            }
            CommandEffect::Scale(scale) => {
                if !scale.is_finite() || scale < 0.0 {
                    log::warn!("Ignoring invalid glyph scale {}", scale);
                    return false;
                }
                self.scale = scale;
                true
            }
            CommandEffect::Speed(speed) => {
                if !speed.is_finite() || speed <= 0.0 {
                    log::warn!("Ignoring invalid reveal speed {}", speed);
                    return false;
                }
                self.speed = speed;
                true
            }
            CommandEffect::Animation(style) => {
                self.animation_style = style;
                true
            }
        }
    }
}

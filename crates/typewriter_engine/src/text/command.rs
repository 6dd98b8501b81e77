//! Command interpretation
//!
//! Turns a gathered [`Command`] into a typed [`CommandEffect`]. Authoring
//! mistakes never abort playback: unknown names resolve to `None`, and a
//! malformed numeric argument falls back to that argument's default.

use super::markup::Command;
use super::style::AnimationStyle;
use crate::foundation::math::Color;

/// Default for any color channel left out or mistyped
const DEFAULT_CHANNEL: f32 = 1.0;

/// Default for a missing or mistyped size or speed argument
const DEFAULT_FACTOR: f32 = 1.0;

/// What a recognized command does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandEffect {
    /// Move the anchor to the start of the next line
    NewLine,
    /// Set the glyph tint
    Color(Color),
    /// Set the glyph scale
    Scale(f32),
    /// Set the reveal speed multiplier
    Speed(f32),
    /// Set the motion of new glyphs
    Animation(AnimationStyle),
}

impl CommandEffect {
    /// Interpret a command, or `None` when it is not recognized
    pub fn from_command(command: &Command) -> Option<Self> {
        let args = &command.arguments;
        let effect = match command.name.as_str() {
            "n" | "new" => Self::NewLine,
            "c" | "col" | "color" => {
                let channel = |i: usize| float_argument(args, i, DEFAULT_CHANNEL);
                Self::Color(Color::new(channel(0), channel(1), channel(2), channel(3)))
            }
            "si" | "size" => Self::Scale(float_argument(args, 0, DEFAULT_FACTOR)),
            "sp" | "speed" => Self::Speed(float_argument(args, 0, DEFAULT_FACTOR)),
            "a" | "an" | "anim" | "animation" => {
                let token = args.first().map_or("", String::as_str);
                match animation_from_token(token) {
                    Some(style) => Self::Animation(style),
                    None => {
                        log::debug!("Ignoring unknown animation {:?}", token);
                        return None;
                    }
                }
            }
            other => {
                log::debug!("Ignoring unknown command {:?} {:?}", other, args);
                return None;
            }
        };
        Some(effect)
    }
}

/// Parse argument `index` as a finite float, falling back to `default`
fn float_argument(args: &[String], index: usize, default: f32) -> f32 {
    match args.get(index) {
        None => default,
        Some(raw) => raw.parse::<f32>().ok().filter(|v| v.is_finite()).unwrap_or_else(|| {
            log::debug!("Malformed numeric argument {:?}, using {}", raw, default);
            default
        }),
    }
}

fn animation_from_token(token: &str) -> Option<AnimationStyle> {
    let style = match token {
        "g" | "grav" | "gravity" => AnimationStyle::Gravity,
        "w" | "wiggle" => AnimationStyle::Wiggle,
        "si" | "sin" | "sine" => AnimationStyle::SineWave,
        "sh" | "shake" => AnimationStyle::Shaking,
        "none" | "off" => AnimationStyle::None,
        _ => return None,
    };
    Some(style)
}

//! Motion variants, dispatched from a single update

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::AnimationSettings;
use crate::foundation::math::{unit_direction, Vec2};
use crate::text::AnimationStyle;

/// Motion state of one glyph
#[derive(Debug, Clone)]
pub enum GlyphMotion {
    /// No motion
    Still,
    /// Circular bob
    Wiggle {
        /// Seconds of wiggling
        timer: f32,
    },
    /// Vertical sine bob
    SineWave {
        /// Seconds of waving
        timer: f32,
    },
    /// Random shake with its own random source
    Shaking {
        /// Per-glyph generator, seeded for reproducible playback
        rng: StdRng,
        /// Seconds since the last direction change
        timer: f32,
        /// Offset currently eased toward
        target: Vec2,
    },
    /// Delayed fall
    Gravity {
        /// Seconds since placement
        timer: f32,
        /// Current velocity in pixels per second
        velocity: Vec2,
    },
}

/// Derive a per-glyph seed so neighbouring glyphs do not shake in lockstep
pub fn glyph_seed(seed: u64, sequence: u64) -> u64 {
    seed ^ sequence.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl GlyphMotion {
    /// Motion for a glyph placed with `style`.
    ///
    /// `seed` only matters for shaking glyphs; `None` uses system entropy.
    pub fn new(style: AnimationStyle, settings: &AnimationSettings, seed: Option<u64>) -> Self {
        match style {
            AnimationStyle::None => Self::Still,
            AnimationStyle::Wiggle => Self::Wiggle { timer: 0.0 },
            AnimationStyle::SineWave => Self::SineWave { timer: 0.0 },
            AnimationStyle::Shaking => Self::Shaking {
                rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
                // First update picks a direction immediately
                timer: settings.shake_interval,
                target: Vec2::zeros(),
            },
            AnimationStyle::Gravity => Self::Gravity {
                timer: 0.0,
                velocity: Vec2::zeros(),
            },
        }
    }

    /// Advance one tick, writing the glyph's offset.
    ///
    /// Returns `true` when the motion has run out and the glyph should start
    /// fading on its own.
    pub fn update(&mut self, offset: &mut Vec2, delta_time: f32, settings: &AnimationSettings) -> bool {
        match self {
            Self::Still => false,
            Self::Wiggle { timer } => {
                *timer += delta_time;
                let phase = *timer * settings.sin_frequency;
                *offset = Vec2::new(phase.cos(), phase.sin() * settings.sin_amplitude);
                false
            }
            Self::SineWave { timer } => {
                *timer += delta_time;
                offset.y = (*timer * settings.sin_frequency).sin() * settings.sin_amplitude;
                false
            }
            Self::Shaking { rng, timer, target } => {
                *timer += delta_time;
                if *timer >= settings.shake_interval {
                    *timer = 0.0;
                    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                    *target = unit_direction(angle) * settings.shake_amplitude;
                }
                *offset += (*target - *offset) * settings.shake_speed;
                false
            }
            Self::Gravity { timer, velocity } => {
                *offset += *velocity * delta_time;
                *timer += delta_time;
                if *timer >= settings.gravity_delay {
                    velocity.y += settings.gravity_acceleration * delta_time;
                }
                settings
                    .gravity_lifetime
                    .is_some_and(|lifetime| *timer >= settings.gravity_delay + lifetime)
            }
        }
    }
}

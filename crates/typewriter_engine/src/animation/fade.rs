//! Linear fade-out at the end of a glyph's life

/// Fade progress of a glyph that has been told to end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Alpha when the fade began
    pub start_alpha: f32,
    /// Seconds since the fade began
    pub elapsed: f32,
}

impl Fade {
    /// Start a fade from the given alpha
    pub const fn new(start_alpha: f32) -> Self {
        Self { start_alpha, elapsed: 0.0 }
    }

    /// Advance the fade and return the alpha to display
    pub fn update(&mut self, delta_time: f32, duration: f32) -> f32 {
        self.elapsed += delta_time;
        self.alpha(duration)
    }

    /// Alpha at the current point of the fade
    pub fn alpha(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            return 0.0;
        }
        (self.start_alpha * (duration - self.elapsed) / duration).max(0.0)
    }

    /// Whether the fade has run its full duration
    pub fn is_finished(&self, duration: f32) -> bool {
        self.elapsed >= duration
    }
}

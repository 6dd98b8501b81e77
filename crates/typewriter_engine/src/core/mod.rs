//! # Core Module
//!
//! Shared configuration used by every subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for timing, layout, animation and atlas

pub mod config;

// Re-export commonly used config types
pub use config::{
    TypewriterConfig,
    TimingSettings,
    Config,
    ConfigError,
};

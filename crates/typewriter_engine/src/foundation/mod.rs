//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math and color types
//! - The glyph arena and its handles
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;

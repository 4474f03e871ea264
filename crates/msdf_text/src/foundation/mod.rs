//! Foundation module - Core utilities and types
//!
//! This module provides the small building blocks shared by the text and
//! rendering layers:
//! - Math aliases, rectangles and colors
//! - Logging utilities

pub mod math;
pub mod logging;

//! Foundation module - Core utilities and types
//!
//! - Math types (vectors, rectangles)
//! - Logging utilities

pub mod logging;
pub mod math;

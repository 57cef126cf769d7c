//! Cross-module tests
//!
//! - **`font_fixture`**: a TrueType font built in memory
//! - **`lifecycle`**: ownership, release modes and cache policies
//! - **`metrics`**: font metrics through the wrappers

pub mod font_fixture;

mod lifecycle;
mod metrics;

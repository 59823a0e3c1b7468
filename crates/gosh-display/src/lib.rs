//! Type-directed display engine for gosh values.
//!
//! This crate provides:
//! - The renderer (`render`)
//! - Grid packing for file listings (`grid`)
//! - Byte-size formatting (`units`)

pub mod grid;
pub mod render;
pub mod units;

pub use render::{render, RenderOptions};

//! `labelforge-core` — shared building blocks for the label pipeline.
//!
//! This crate contains **pure** primitives (no image or filesystem concerns).

pub mod error;
pub mod units;

pub use error::{LabelError, LabelResult};

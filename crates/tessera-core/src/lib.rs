//! Core types and utilities for the Tessera layout engine.
//!
//! This crate provides the vocabulary shared by the layout crate and by
//! applications building layout trees:
//! - Geometry value types (sizes, insets, axes)
//! - Sizing modes (`Dimension`) and measurement modes (`MeasureSpec`)
//! - Per-node `LayoutProperties`
//! - Error types

pub mod errors;
pub mod properties;
pub mod types;

pub use errors::*;
pub use properties::*;
pub use types::*;

//! CPU-side mesh attribute types and the buffer merge.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`AttributeBuffer`] / [`AttributeData`] - Typed per-vertex attribute arrays
//! - [`Spatial`] - How an attribute responds to placement transforms
//! - [`MeshSource`] - One placeable object's attribute arrays
//! - [`merge`] - Flattens many placed sources into one [`MergedBuffer`]
//! - Generators for common shapes (brick, quad)

mod attribute;
pub mod generators;
mod merge;

pub use attribute::{AttributeBuffer, AttributeData, ScalarType, Spatial};
pub use merge::{
    merge, merge_with_options, MergeError, MergeOptions, MergedBuffer, MeshSource,
    POSITION_ATTRIBUTE,
};

//! # NanoBricks Core
//!
//! Engine-agnostic core of the NanoBricks voxel design tool: mesh attribute
//! merging, flight navigation, and the supporting math and input types.

pub mod controls;
pub mod input;
pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version at startup.
pub fn init() {
    log::info!("NanoBricks core v{} initialized", VERSION);
}

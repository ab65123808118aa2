//! Common utilities for the simulation binaries
//!
//! Shared window/GPU setup, the orthographic camera, and small buffer helpers.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;

// src/lib.rs
//! Tabletop viewer
//!
//! Renders a fixed desk scene of textured primitives with a first-person fly
//! camera, built on wgpu and winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::TabletopApp;
pub use config::ViewerConfig;
pub use error::{TextureError, ViewerError};

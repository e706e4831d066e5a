// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, materials and lights for rendering.

pub mod lights;
pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use lights::{LightSource, SceneLights};
pub use material::{MaterialLibrary, ObjectMaterial};
pub use texture_registry::{TextureRegistry, MAX_TEXTURE_SLOTS};
pub use texture_resource::{decode_texture, BoundTexture, DecodedImage, TextureResource};

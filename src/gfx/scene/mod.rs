//! # Scene Module
//!
//! The desk scene as data: placed objects, their transforms and shapes, and
//! the [`SceneManager`] that turns them into uniform writes and draws.
//!
//! ## Key Components
//!
//! - [`SceneManager`] - Owns textures, materials, lights and the object list
//! - [`SceneObject`] - One placed shape with material and surface
//! - [`Transform`] - Scale, rotation and position composed into a model matrix
//! - [`ShapeKind`] - The primitive mesh catalog
//! - [`Vertex3D`] - Position, normal and texture coordinate vertex layout

pub mod mesh;
pub mod scene_manager;
pub mod scene_object;
pub mod tabletop;
pub mod transform;
pub mod vertex;

pub use mesh::{DrawMesh, GpuMesh, ShapeKind, ShapeMeshes};
pub use scene_manager::{DrawSink, SceneGpuResources, SceneManager};
pub use scene_object::{SceneObject, Surface};
pub use tabletop::{tabletop_objects, TEXTURE_CATALOG};
pub use transform::Transform;
pub use vertex::Vertex3D;

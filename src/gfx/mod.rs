//! # Graphics Module
//!
//! Everything between window events and pixels: the fly camera, the view
//! manager that turns it into view and projection uniforms, the scene manager
//! that sequences per-object uniform writes and draws, and the wgpu engine
//! that replays them.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - First-person fly camera and key tracking
//! - **View Management** ([`view`]) - Projection modes and per-frame view uniforms
//! - **Shader Interface** ([`shader`]) - Named uniform writes and their GPU layouts
//! - **Scene Management** ([`scene`]) - Placed objects and the draw sequence
//! - **Resources** ([`resources`]) - Textures, materials and lights
//! - **Geometry** ([`geometry`]) - Procedural primitive meshes
//! - **Rendering** ([`rendering`]) - Frame recording, pipelines and passes
//!
//! ## Usage
//!
//! ```no_run
//! use tabletop::gfx::{rendering::FrameRecorder, scene::SceneManager};
//!
//! let scene: SceneManager<()> = SceneManager::new("resources");
//! let mut recorder = FrameRecorder::new();
//! scene.render_scene(&mut recorder);
//! assert_eq!(recorder.draws().len(), scene.objects().len());
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod view;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::RenderEngine;
pub use scene::SceneManager;
pub use view::ViewManager;

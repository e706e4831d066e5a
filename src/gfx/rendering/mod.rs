//! Core rendering functionality
//!
//! Records uniform writes and draws on the CPU, then uploads and replays them
//! through the scene and shadow pipelines.

pub mod frame_recorder;
pub mod pipeline_manager;
pub mod render_engine;

pub use frame_recorder::{DrawCommand, FrameRecorder};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;

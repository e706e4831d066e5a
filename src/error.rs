//! Error types for the viewer
//!
//! Initialization failures surface as [`ViewerError`] and abort the run.
//! Texture problems surface as [`TextureError`] and are logged by the scene
//! manager without stopping the scene.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while bringing up the window, GPU context or configuration
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create the event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the display window")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("failed to create a rendering surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open a graphics device")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while loading a texture image into the scene
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not read image {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode image")]
    Decode(#[from] image::ImageError),

    #[error("not implemented to handle image with {0} channels")]
    UnsupportedChannels(u8),

    #[error("image is {width}x{height}, the device allows at most {limit} texels per side")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("all {0} texture slots are in use")]
    SlotsExhausted(usize),
}

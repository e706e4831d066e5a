pub mod frame_clock;
pub mod projection;
pub mod view_manager;

pub use frame_clock::FrameClock;
pub use projection::{ProjectionMode, ProjectionParams};
pub use view_manager::ViewManager;

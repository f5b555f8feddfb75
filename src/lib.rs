pub mod backend;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod input;
pub mod projection;
pub mod scene;
pub mod shading;
pub mod traits;
pub mod transform;
pub mod viewer;
pub mod window;

pub use camera::{Camera, CameraState, Direction, NavigationMode};
pub use config::ViewerConfig;
pub use input::InputMapper;
pub use transform::{SharedTransform, TransformOp, TransformSynchronizer};
pub use viewer::Viewer;

pub mod camera;
pub mod cli;
pub mod config;
pub mod frame;
pub mod input;
pub mod math;
pub mod motion;
pub mod rig;
pub mod terrain;

pub use camera::{CameraPose, CameraUniform, Viewport};
pub use config::RtsCameraConfig;
pub use input::{InputSnapshot, InputSource, Key, MouseButton, WinitInput};
pub use rig::{PivotState, RtsCamera};
pub use terrain::{
    GroundPlane, Heightfield, LayerMask, RaycastHit, SceneQuery, Shape, TerrainScene, TriangleMesh,
};

pub mod assets;
pub mod camera;
pub mod config;
pub mod frame_pacer;
pub mod logging;
pub mod mesh;
pub mod model;
pub mod primitives;
pub mod scene;

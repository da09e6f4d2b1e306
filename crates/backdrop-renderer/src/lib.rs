//! # Backdrop Renderer
//!
//! GPU side of the particle backdrop: camera, per-layer uniforms, the point
//! shader template and the render pipelines drawing the four layers.

pub mod camera;
pub mod context;
pub mod error;
pub mod layer;
pub mod renderer;
pub mod uniforms;

pub use camera::*;
pub use context::*;
pub use error::*;
pub use layer::*;
pub use renderer::*;
pub use uniforms::*;

//! # Backdrop Core
//!
//! Host-side model of the animated particle backdrop: point populations,
//! responsive placement, scroll/theme reactors and the per-frame state the
//! renderer consumes. Nothing in this crate touches the GPU.

pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod frame;
pub mod lifecycle;
pub mod placement;
pub mod population;
pub mod reactors;
pub mod shading;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use driver::*;
pub use frame::*;
pub use lifecycle::*;
pub use placement::*;
pub use population::*;
pub use reactors::*;
pub use shading::{LayerStyle, VertexOut};

//! WebGPU rendering module
//!
//! Flat-colored triangle lists built on the CPU each frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_vertices;
pub use vertex::Vertex;

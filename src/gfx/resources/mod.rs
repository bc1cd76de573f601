//! GPU resource management
//!
//! Handles uniform buffers, materials, and the depth texture.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig};
pub use material::{Material, MaterialManager};
pub use texture_resource::DepthTexture;

// src/wgpu_utils/mod.rs
//! Small wgpu helpers shared by the render engine and resource modules
//!
//! Builder types for bind group layouts plus a change-tracking uniform
//! buffer wrapper.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;

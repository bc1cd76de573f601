//! Core rendering functionality
//!
//! Handles the forward render pipeline, GPU resource management, and frame
//! rendering.

pub mod render_engine;

pub use render_engine::RenderEngine;

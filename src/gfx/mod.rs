//! # Graphics Module
//!
//! All graphics-related functionality for the viewer: the camera system,
//! the render pipeline, scene management, and GPU resource handling.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with damped controls
//! - **Rendering Pipeline** ([`rendering`]) - Forward rendering of the scene
//! - **Scene Management** ([`scene`]) - Object hierarchy and name lookup
//! - **Resource Management** ([`resources`]) - Materials and GPU resources
//! - **Viewport** ([`viewport`]) - Window size and pixel ratio tracking

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod viewport;

pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
pub use viewport::Viewport;

// src/lib.rs
//! Fishbowl
//!
//! A small 3D scene viewer built on wgpu and winit. It loads a binary glTF
//! scene in the background, bobs named objects on sine waves, plays a looping
//! soundtrack and orbits the camera with inertial damping.

pub mod animation;
pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::FishbowlApp;
pub use config::ViewerConfig;

/// Creates a viewer application for the given configuration
pub fn viewer(config: ViewerConfig) -> FishbowlApp {
    FishbowlApp::new(config)
}

//! Viewer configuration
//!
//! [`ViewerConfig`] gathers everything needed to present one scene: the
//! model to load, the initial camera pose, the optional audio track, the
//! scene light, and the set of bob animations keyed by object name.

use std::path::PathBuf;

use cgmath::Vector3;

use crate::animation::Bob;
use crate::audio::AudioConfig;
use crate::gfx::resources::LightConfig;

/// Declarative description of a viewer session
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub window_title: String,
    /// Initial logical window size (width, height).
    pub window_size: (u32, u32),
    pub model_path: PathBuf,
    pub audio: Option<AudioConfig>,
    pub camera_eye: Vector3<f32>,
    pub camera_target: Vector3<f32>,
    pub light: LightConfig,
    pub bobs: Vec<Bob>,
}

impl ViewerConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            window_title: "fishbowl".to_string(),
            window_size: (1200, 800),
            model_path: model_path.into(),
            audio: None,
            camera_eye: Vector3::new(10.0, 5.0, 10.0),
            camera_target: Vector3::new(0.0, 0.0, 0.0),
            light: LightConfig::default(),
            bobs: Vec::new(),
        }
    }

    pub fn with_window_title(mut self, title: &str) -> Self {
        self.window_title = title.to_string();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_audio(mut self, audio: AudioConfig) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Sets the initial camera pose as an eye point looking at a target
    pub fn with_camera(mut self, eye: Vector3<f32>, target: Vector3<f32>) -> Self {
        self.camera_eye = eye;
        self.camera_target = target;
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = light;
        self
    }

    /// Adds a bob animation; call once per animated object
    pub fn with_bob(mut self, bob: Bob) -> Self {
        self.bobs.push(bob);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::new("assets/tank.glb");
        assert_eq!(config.model_path, PathBuf::from("assets/tank.glb"));
        assert_eq!(config.window_size, (1200, 800));
        assert!(config.audio.is_none());
        assert!(config.bobs.is_empty());
    }

    #[test]
    fn test_bobs_keep_insertion_order() {
        let config = ViewerConfig::new("tank.glb")
            .with_bob(Bob::new("White_Fish", 0.8, 0.0, 0.006))
            .with_bob(Bob::new("Purple_Fish", 1.2, 0.0, 0.006));

        assert_eq!(config.bobs.len(), 2);
        assert_eq!(config.bobs[0].target, "White_Fish");
        assert_eq!(config.bobs[1].target, "Purple_Fish");
    }

    #[test]
    fn test_builder_sets_camera_and_audio() {
        let config = ViewerConfig::new("tank.glb")
            .with_camera(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 1.0, 0.0))
            .with_audio(AudioConfig::new("waves.mp3").with_volume(0.25));

        assert_eq!(config.camera_eye, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera_target, Vector3::new(0.0, 1.0, 0.0));

        let audio = config.audio.expect("audio should be set");
        assert_eq!(audio.volume, 0.25);
    }
}

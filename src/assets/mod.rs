//! Asset loading
//!
//! Model files are parsed on a background thread so the window opens and
//! the render loop starts ticking immediately. The loader hands its result
//! over a channel that the app polls once per tick; a missing or corrupt
//! file therefore surfaces as a logged error while the viewer keeps
//! running with an empty scene.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use thiserror::Error;

pub mod gltf_loader;

pub use gltf_loader::{LoadedMaterial, LoadedModel, LoadedObject, MeshData};

/// Errors produced while loading a model file
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to open model {path}: {source}")]
    Open {
        path: PathBuf,
        source: gltf::Error,
    },

    #[error("model {path} references a binary chunk that is not embedded")]
    MissingBlob { path: PathBuf },

    #[error("failed to read buffer '{uri}' for model {path}: {source}")]
    BufferRead {
        path: PathBuf,
        uri: String,
        source: std::io::Error,
    },

    #[error("mesh primitive in {path} has no vertex positions")]
    MissingPositions { path: PathBuf },
}

/// Channel end delivering the background loader's result
pub type ModelReceiver = mpsc::Receiver<Result<LoadedModel, AssetError>>;

/// Starts loading a model on a background thread
///
/// The result arrives on the returned channel exactly once. If the
/// receiver is dropped before loading finishes, the result is discarded.
pub fn spawn_model_loader(path: PathBuf) -> ModelReceiver {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let result = gltf_loader::load_model(&path);
        let _ = sender.send(result);
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_reports_missing_file() {
        let receiver = spawn_model_loader(PathBuf::from("does/not/exist.glb"));

        let result = receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("loader thread should always send a result");

        match result {
            Err(AssetError::Open { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.glb"));
            }
            other => panic!("expected an open error, got {other:?}"),
        }
    }
}

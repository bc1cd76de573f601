//! # Scene Management Module
//!
//! Object hierarchy, scene graph and vertex data for the viewer.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container that owns objects, the camera, and materials
//! - [`Object`] - A named mesh group with a decomposed transform
//! - [`Vertex3D`] - GPU vertex format with position and normal
//!
//! Objects enter the scene through [`Scene::insert_model`] once the
//! asset loader delivers a parsed model, and are addressed afterwards by
//! exact name lookup.

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{DrawObject, Mesh, Object};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;

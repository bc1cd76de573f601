//! Dear ImGui overlay.
//!
//! [`UiManager`] wires ImGui into winit and wgpu and handles input capture so
//! that clicks on a panel do not also orbit the camera. [`status_panel`] is
//! the default overlay shown by the viewer binary; applications can replace
//! it with their own closure via [`FishbowlApp::set_ui`].
//!
//! [`FishbowlApp::set_ui`]: crate::app::FishbowlApp::set_ui

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::status_panel;

//! Application shell and per-frame loop.
//!
//! [`FishbowlApp`] owns the winit event loop and drives one tick per display
//! refresh: pick up the loaded model if it has arrived, advance the bob
//! animations by wall-clock time, settle the camera, and render the scene
//! with the UI overlay on top.

use std::sync::mpsc::TryRecvError;
use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::animation::{BobAnimator, Clock};
use crate::assets::{self, ModelReceiver};
use crate::audio::AudioPlayer;
use crate::config::ViewerConfig;
use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    scene::Scene,
    RenderEngine, Viewport,
};
use crate::ui::UiManager;

/// Per-frame UI callback with read access to the scene and the animator.
pub type UiCallback = Box<dyn Fn(&imgui::Ui, &Scene, &BobAnimator) + Send + Sync>;

/// Top-level viewer application.
///
/// Built from a [`ViewerConfig`]; [`run`](Self::run) starts the model load
/// and the audio track, then hands control to the event loop until the
/// window closes.
pub struct FishbowlApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
    ui_callback: Option<UiCallback>,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    viewport: Option<Viewport>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    animator: BobAnimator,
    clock: Clock,
    model_rx: Option<ModelReceiver>,
    audio: Option<AudioPlayer>,
    ui_callback: Option<UiCallback>,
}

impl FishbowlApp {
    /// Creates the application for the given configuration.
    pub fn new(config: ViewerConfig) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let (width, height) = config.window_size;
        let aspect = width as f32 / height.max(1) as f32;
        let camera = OrbitCamera::look_from(config.camera_eye, config.camera_target, aspect);
        let controller = CameraController::new(0.005, 0.1);
        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);
        let animator = BobAnimator::new(config.bobs.clone());

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                viewport: None,
                render_engine: None,
                ui_manager: None,
                scene,
                animator,
                clock: Clock::new(),
                model_rx: None,
                audio: None,
                ui_callback: None,
            },
            ui_callback: None,
        }
    }

    /// Set UI callback
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: Fn(&imgui::Ui, &Scene, &BobAnimator) + Send + Sync + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        self.app_state.ui_callback = self.ui_callback.take();

        // Start loading before the window exists; the scene stays empty
        // until the result arrives.
        self.app_state.model_rx = Some(assets::spawn_model_loader(
            self.app_state.config.model_path.clone(),
        ));

        if let Some(audio_config) = self.app_state.config.audio.clone() {
            match AudioPlayer::start(&audio_config) {
                Ok(player) => self.app_state.audio = Some(player),
                Err(error) => log::error!("audio disabled: {error}"),
            }
        }

        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.window_title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        if let Ok(window) = event_loop.create_window(attributes) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let viewport = Viewport::new(window_handle.inner_size(), window_handle.scale_factor());
            let (render_width, render_height) = viewport.render_size();
            self.scene.camera_manager.camera.set_aspect(viewport.aspect());

            let window_clone = window_handle.clone();
            let mut renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, render_width, render_height).await
            });
            renderer.set_light(self.config.light);

            self.scene.init_gpu_resources(renderer.device(), renderer.queue());

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.viewport = Some(viewport);

            // Animation time starts once the window is up.
            self.clock.restart();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // The UI sees every event first and may capture it.
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let winit::keyboard::PhysicalKey::Code(key_code) = key_event.physical_key {
                    match key_code {
                        winit::keyboard::KeyCode::Escape => {
                            event_loop.exit();
                            return;
                        }
                        winit::keyboard::KeyCode::KeyM => {
                            if key_event.state.is_pressed() && !key_event.repeat {
                                if let Some(audio) = self.audio.as_ref() {
                                    if audio.is_paused() {
                                        audio.play();
                                    } else {
                                        audio.pause();
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::Resized(physical) => {
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.resize(physical, window.scale_factor());
                    self.scene
                        .camera_manager
                        .camera
                        .set_aspect(viewport.aspect());

                    let (render_width, render_height) = viewport.render_size();
                    render_engine.resize(render_width, render_height);
                    if let Some(ui_manager) = self.ui_manager.as_mut() {
                        ui_manager.update_display_size(render_width, render_height);
                    }
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                // Adopt the model once the loader thread delivers it. Load
                // failures are logged and the viewer keeps running empty.
                if let Some(receiver) = self.model_rx.as_ref() {
                    match receiver.try_recv() {
                        Ok(Ok(model)) => {
                            self.scene.insert_model(
                                model,
                                render_engine.device(),
                                render_engine.queue(),
                            );
                            self.animator.resolve(&self.scene);
                            self.model_rx = None;
                        }
                        Ok(Err(error)) => {
                            log::error!("model load failed: {error}");
                            self.model_rx = None;
                        }
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => {
                            log::error!("model loader exited without a result");
                            self.model_rx = None;
                        }
                    }
                }

                let elapsed = self.clock.elapsed();
                self.animator.apply(&mut self.scene, elapsed);
                self.scene.update();
                self.scene.sync_transforms(render_engine.queue());
                render_engine.update(self.scene.camera_manager.camera.uniform);

                if let (Some(ui_manager), Some(ui_callback)) =
                    (self.ui_manager.as_mut(), &self.ui_callback)
                {
                    ui_manager.update_logic(window, |ui| {
                        ui_callback(ui, &self.scene, &self.animator);
                    });
                    render_engine.render_frame_with_ui(
                        &self.scene,
                        |device, queue, encoder, color_attachment| {
                            ui_manager.render_display_only(device, queue, encoder, color_attachment);
                        },
                    );
                } else {
                    render_engine.render_frame_simple(&self.scene);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Camera input is suppressed while the UI wants the mouse.
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

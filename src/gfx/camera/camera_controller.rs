use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Velocities below this are treated as settled and zeroed out.
const SETTLE_THRESHOLD: f32 = 1e-5;

/// Translates pointer input into damped orbit camera motion
///
/// Input events accumulate pending yaw/pitch/zoom/pan velocities; [`update`]
/// applies them to the camera once per tick and multiplies them by the
/// damping factor, so motion eases out over the following ticks instead of
/// stopping with the pointer. `update` takes no timestep: the decay rate is
/// per call, and calls happen once per rendered frame.
///
/// [`update`]: CameraController::update
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of pending velocity carried into the next tick (0..1).
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pan_velocity: (f32, f32),
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping: 0.85,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            pan_velocity: (0.0, 0.0),
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        _camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.add_zoom_input(scroll_amount);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    if self.is_shift_held {
                        // SHIFT + DRAG = pan (move the focus point)
                        self.add_pan_input(-delta.0 as f32, delta.1 as f32);
                    } else {
                        // DRAG = orbit around the focus point
                        self.add_rotation_input(delta.0 as f32, delta.1 as f32);
                    }
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, _camera: &mut OrbitCamera) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
            state,
            ..
        } = event
        {
            self.is_shift_held = *state == ElementState::Pressed;
        }
    }

    /// Accumulates a drag delta as pending orbital velocity
    pub fn add_rotation_input(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += -dx * self.rotate_speed;
        self.pitch_velocity += dy * self.rotate_speed;
    }

    /// Accumulates a wheel delta as pending zoom velocity
    pub fn add_zoom_input(&mut self, amount: f32) {
        self.zoom_velocity += amount * self.zoom_speed;
    }

    /// Accumulates a shift-drag delta as pending pan velocity
    pub fn add_pan_input(&mut self, dx: f32, dy: f32) {
        self.pan_velocity.0 += dx * self.pan_speed;
        self.pan_velocity.1 += dy * self.pan_speed;
    }

    /// Applies one damping step of the pending velocities to the camera
    ///
    /// Called exactly once per tick. With no pending input the camera is
    /// left untouched.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        if self.yaw_velocity != 0.0 {
            camera.add_yaw(self.yaw_velocity);
        }
        if self.pitch_velocity != 0.0 {
            camera.add_pitch(self.pitch_velocity);
        }
        if self.zoom_velocity != 0.0 {
            camera.add_distance(self.zoom_velocity);
        }
        if self.pan_velocity != (0.0, 0.0) {
            camera.pan(self.pan_velocity);
        }

        self.yaw_velocity = decay(self.yaw_velocity, self.damping);
        self.pitch_velocity = decay(self.pitch_velocity, self.damping);
        self.zoom_velocity = decay(self.zoom_velocity, self.damping);
        self.pan_velocity.0 = decay(self.pan_velocity.0, self.damping);
        self.pan_velocity.1 = decay(self.pan_velocity.1, self.damping);
    }

    /// Returns true while damped motion from earlier input is still playing out
    pub fn is_coasting(&self) -> bool {
        self.yaw_velocity != 0.0
            || self.pitch_velocity != 0.0
            || self.zoom_velocity != 0.0
            || self.pan_velocity != (0.0, 0.0)
    }
}

fn decay(velocity: f32, damping: f32) -> f32 {
    let damped = velocity * damping;
    if damped.abs() < SETTLE_THRESHOLD {
        0.0
    } else {
        damped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn test_camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.3, 0.1, Vector3::zero(), 1.0)
    }

    #[test]
    fn test_update_without_input_leaves_camera_unchanged() {
        let mut camera = test_camera();
        let mut controller = CameraController::new(0.005, 0.5);

        let (yaw, pitch, distance, eye) =
            (camera.yaw, camera.pitch, camera.distance, camera.eye);
        controller.update(&mut camera);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
        assert_eq!(camera.distance, distance);
        assert_eq!(camera.eye, eye);
        assert!(!controller.is_coasting());
    }

    #[test]
    fn test_rotation_impulse_is_applied_then_damped() {
        let mut camera = test_camera();
        let mut controller = CameraController::new(0.005, 0.5);

        controller.add_rotation_input(-1.0, 0.0);
        assert_eq!(controller.yaw_velocity, 0.005);

        let yaw_before = camera.yaw;
        controller.update(&mut camera);
        assert!((camera.yaw - (yaw_before + 0.005)).abs() < 1e-7);

        // Velocity decays by the damping factor each tick.
        assert!((controller.yaw_velocity - 0.005 * controller.damping).abs() < 1e-9);
        assert!(controller.is_coasting());
    }

    #[test]
    fn test_motion_eases_out_over_ticks() {
        let mut camera = test_camera();
        let mut controller = CameraController::new(0.01, 0.5);

        controller.add_rotation_input(-1.0, 0.0);
        let mut previous_step = f32::MAX;
        for _ in 0..8 {
            let yaw_before = camera.yaw;
            controller.update(&mut camera);
            let step = camera.yaw - yaw_before;
            assert!(step >= 0.0);
            assert!(step < previous_step);
            previous_step = step;
        }
    }

    #[test]
    fn test_velocity_settles_to_zero() {
        let mut camera = test_camera();
        let mut controller = CameraController::new(0.005, 0.5);

        controller.add_rotation_input(-1.0, 0.5);
        for _ in 0..200 {
            controller.update(&mut camera);
        }
        assert!(!controller.is_coasting());

        // Once settled, further updates no longer move the camera.
        let yaw = camera.yaw;
        controller.update(&mut camera);
        assert_eq!(camera.yaw, yaw);
    }

    #[test]
    fn test_zoom_input_scales_with_speed() {
        let mut controller = CameraController::new(0.005, 0.5);
        controller.add_zoom_input(2.0);
        assert!((controller.zoom_velocity - 1.0).abs() < 1e-7);
    }
}

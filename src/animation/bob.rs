use crate::gfx::scene::Scene;

/// Vertical oscillation settings for one named scene object
///
/// Each tick contributes `amplitude * sin(elapsed * frequency + phase)` to
/// the target's local Y position. The offsets are added rather than
/// assigned, so successive ticks build the characteristic drifting bob of
/// the fish rather than a fixed sine path.
#[derive(Debug, Clone)]
pub struct Bob {
    /// Exact name of the scene object to animate.
    pub target: String,
    /// Oscillation frequency in radians per second of elapsed time.
    pub frequency: f32,
    /// Phase offset in radians, used to desynchronize multiple targets.
    pub phase: f32,
    /// Peak per-tick displacement in scene units.
    pub amplitude: f32,
}

impl Bob {
    pub fn new(target: &str, frequency: f32, phase: f32, amplitude: f32) -> Self {
        Self {
            target: target.to_string(),
            frequency,
            phase,
            amplitude,
        }
    }

    /// Vertical step contributed at `elapsed` seconds
    pub fn offset_at(&self, elapsed: f32) -> f32 {
        self.amplitude * (elapsed * self.frequency + self.phase).sin()
    }
}

struct BobBinding {
    bob: Bob,
    object_index: Option<usize>,
    missing_logged: bool,
}

/// Applies bob animations to their resolved scene objects each tick
///
/// Targets are bound by name lookup once the model has loaded; until then
/// (and for names the model never provides) the animator silently skips
/// them, logging each missing target a single time.
pub struct BobAnimator {
    bindings: Vec<BobBinding>,
}

impl BobAnimator {
    pub fn new(bobs: Vec<Bob>) -> Self {
        let bindings = bobs
            .into_iter()
            .map(|bob| BobBinding {
                bob,
                object_index: None,
                missing_logged: false,
            })
            .collect();

        Self { bindings }
    }

    /// Binds unresolved targets against the scene's current objects
    ///
    /// Call after inserting loaded geometry. Targets that stay unresolved
    /// keep their binding and may resolve on a later call if more objects
    /// arrive.
    pub fn resolve(&mut self, scene: &Scene) {
        for binding in &mut self.bindings {
            if binding.object_index.is_some() {
                continue;
            }

            binding.object_index = scene.find_object_index(&binding.bob.target);
            if binding.object_index.is_none() && !binding.missing_logged {
                log::warn!(
                    "animation target '{}' not found in scene",
                    binding.bob.target
                );
                binding.missing_logged = true;
            }
        }
    }

    /// Adds this tick's offset to every resolved target
    pub fn apply(&mut self, scene: &mut Scene, elapsed: f32) {
        for binding in &self.bindings {
            let Some(index) = binding.object_index else {
                continue;
            };

            if let Some(object) = scene.get_object_mut(index) {
                object.position.y += binding.bob.offset_at(elapsed);
            }
        }
    }

    pub fn bob_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|binding| binding.object_index.is_some())
            .count()
    }

    /// Target names with their resolution state, for status display
    pub fn statuses(&self) -> impl Iterator<Item = (&str, bool)> {
        self.bindings
            .iter()
            .map(|binding| (binding.bob.target.as_str(), binding.object_index.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::scene::Object;
    use cgmath::{Vector3, Zero};
    use std::f32::consts::FRAC_PI_2;

    fn scene_with(names: &[&str]) -> Scene {
        let camera = OrbitCamera::new(5.0, 0.3, 0.1, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.5);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        for name in names {
            scene.objects.push(Object::new(*name, Vec::new()));
        }
        scene
    }

    #[test]
    fn test_offset_follows_sine() {
        let bob = Bob::new("White_Fish", 0.8, 0.0, 0.006);
        let expected = 0.006 * (0.8f32).sin();
        assert!((bob.offset_at(1.0) - expected).abs() < 1e-7);
    }

    #[test]
    fn test_phase_shifts_oscillation() {
        let bob = Bob::new("Purple_Fish", 1.2, FRAC_PI_2, 0.006);
        // At t=0 the phase-shifted sine starts at its peak.
        assert!((bob.offset_at(0.0) - 0.006).abs() < 1e-7);
    }

    #[test]
    fn test_apply_accumulates_offsets() {
        let mut scene = scene_with(&["White_Fish"]);
        scene.objects[0].position.y = 5.0;

        let mut animator = BobAnimator::new(vec![Bob::new("White_Fish", 0.8, 0.0, 0.006)]);
        animator.resolve(&scene);

        animator.apply(&mut scene, 1.0);
        let expected_once = 5.0 + 0.006 * (0.8f32).sin();
        assert!((scene.objects[0].position.y - expected_once).abs() < 1e-6);

        // The same elapsed time applied again moves the object further.
        animator.apply(&mut scene, 1.0);
        let expected_twice = 5.0 + 2.0 * 0.006 * (0.8f32).sin();
        assert!((scene.objects[0].position.y - expected_twice).abs() < 1e-6);
    }

    #[test]
    fn test_apply_skips_unresolved_targets() {
        let mut scene = scene_with(&["White_Fish"]);
        scene.objects[0].position.y = 2.0;

        let mut animator = BobAnimator::new(vec![Bob::new("Ghost_Fish", 1.0, 0.0, 0.5)]);
        animator.resolve(&scene);
        animator.apply(&mut scene, 3.0);

        assert_eq!(animator.resolved_count(), 0);
        assert_eq!(scene.objects[0].position.y, 2.0);
    }

    #[test]
    fn test_resolve_binds_matching_targets() {
        let scene = scene_with(&["White_Fish", "Purple_Fish"]);

        let mut animator = BobAnimator::new(vec![
            Bob::new("White_Fish", 0.8, 0.0, 0.006),
            Bob::new("Ghost_Fish", 1.2, 0.0, 0.006),
        ]);
        animator.resolve(&scene);

        assert_eq!(animator.bob_count(), 2);
        assert_eq!(animator.resolved_count(), 1);

        let statuses: Vec<_> = animator.statuses().collect();
        assert_eq!(statuses[0], ("White_Fish", true));
        assert_eq!(statuses[1], ("Ghost_Fish", false));
    }

    #[test]
    fn test_late_resolve_picks_up_new_objects() {
        let mut scene = scene_with(&[]);
        let mut animator = BobAnimator::new(vec![Bob::new("White_Fish", 0.8, 0.0, 0.006)]);

        animator.resolve(&scene);
        assert_eq!(animator.resolved_count(), 0);

        scene.objects.push(Object::new("White_Fish", Vec::new()));
        animator.resolve(&scene);
        assert_eq!(animator.resolved_count(), 1);
    }
}

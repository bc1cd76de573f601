//! Default UI panels.

use crate::animation::BobAnimator;
use crate::gfx::scene::Scene;

/// Status panel showing scene contents and animation targets.
///
/// Lists object and triangle counts for the loaded model and whether each
/// animation target has been resolved to a scene object.
pub fn status_panel(ui: &imgui::Ui, scene: &Scene, animator: &BobAnimator) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = (display_size[0] * 0.22).clamp(260.0, 360.0);

    ui.window("Viewer")
        .size([panel_width, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            render_scene_stats(ui, scene);
            ui.separator();
            render_animation_status(ui, animator);
        });
}

fn render_scene_stats(ui: &imgui::Ui, scene: &Scene) {
    ui.text("Scene");
    ui.separator();

    let stats = scene.get_statistics();
    if stats.object_count == 0 {
        ui.spacing();
        ui.text("Loading model...");
        ui.spacing();
        return;
    }

    ui.columns(2, "scene_stats", false);
    ui.text("Objects:");
    ui.next_column();
    ui.text(format!("{}", stats.object_count));
    ui.next_column();
    ui.text("Materials:");
    ui.next_column();
    ui.text(format!("{}", stats.material_count));
    ui.next_column();
    ui.text("Triangles:");
    ui.next_column();
    ui.text(format!("{}", stats.total_triangles));
    ui.next_column();
    ui.text("Vertices:");
    ui.next_column();
    ui.text(format!("{}", stats.total_vertices));
    ui.columns(1, "", false);
}

fn render_animation_status(ui: &imgui::Ui, animator: &BobAnimator) {
    ui.text("Animation");
    ui.separator();

    if animator.bob_count() == 0 {
        ui.text("No animated objects");
        return;
    }

    ui.columns(2, "animation_status", false);
    for (target, resolved) in animator.statuses() {
        ui.text(target);
        ui.next_column();
        if resolved {
            ui.text_colored([0.4, 0.9, 0.5, 1.0], "swimming");
        } else {
            ui.text_colored([0.9, 0.7, 0.3, 1.0], "pending");
        }
        ui.next_column();
    }
    ui.columns(1, "", false);
}

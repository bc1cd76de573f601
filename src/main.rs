//! Aquarium viewer binary.
//!
//! Loads the troll aquarium scene, keeps the two fish bobbing on their sine
//! waves, and loops the soundtrack while the camera orbits with inertia.

use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;

use fishbowl::animation::Bob;
use fishbowl::audio::AudioConfig;
use fishbowl::ui::status_panel;
use fishbowl::ViewerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::new("assets/ForTheTrolls.glb")
        .with_audio(AudioConfig::new("assets/lol.mp3"))
        .with_camera(
            Vector3::new(40.453145030319895, 11.041503878457771, 12.321517479276249),
            Vector3::new(-22.063965666916737, 6.885406148470799, -3.9741442649659633),
        )
        .with_bob(Bob::new("White_Fish", 0.8, 0.0, 0.006))
        .with_bob(Bob::new("Purple_Fish", 1.2, FRAC_PI_2, 0.006));

    let mut app = fishbowl::viewer(config);
    app.set_ui(|ui, scene, animator| {
        status_panel(ui, scene, animator);
    });
    app.run()
}

use bevy::prelude::*;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};

use slingshot_range::prelude::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let diagnostics = std::env::args().any(|a| a == "--diagnostics");
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.06, 0.09, 0.16)))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 600.0,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window { title: "Slingshot Range".into(), ..default() }),
            ..default()
        }))
        .add_plugins(ConfigPlugin)       // RON overrides, loaded before the core starts
        .add_plugins(RangeCorePlugin)    // clock, targets, charge/aim, ballistics, camera rig
        .add_plugins(RangeInputPlugin)   // mouse / keyboard / touch -> aim intents
        .add_plugins(ScoreboardPlugin)   // score, victory, restart
        .add_plugins(ScenePlugin)        // world & meshes mirroring the simulation
        .add_plugins(HudPlugin);         // score text, power bar, victory banner
    if diagnostics {
        app.add_plugins(FrameTimeDiagnosticsPlugin)
            .add_plugins(LogDiagnosticsPlugin::default());
    }
    app.run();
}

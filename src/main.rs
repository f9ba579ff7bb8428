mod config;
mod controls;
mod display;
mod game_logic;
mod game_loop;
mod hud;
mod render;
mod services;

use bevy::{prelude::*, window::PresentMode};
use config::{ConfigWarnings, GameConfig, report_config_warnings};
use controls::ControlsPlugin;
use display::DisplayPlugin;
use game_logic::{CANVAS_H, CANVAS_W};
use game_loop::{GameController, GameLoopPlugin, GameRng, GameState};
use hud::HudPlugin;
use services::ServicePlugin;

fn main() {
    let (config, config_error) = GameConfig::load_or_default();
    let (selection, unknown) = config.selection();

    let mut warnings: Vec<String> = config_error
        .into_iter()
        .map(|e| format!("{e}; using defaults"))
        .collect();
    warnings.extend(
        unknown
            .into_iter()
            .map(|name| format!("Unknown track, car or color {name:?} in config, ignored")),
    );

    let present_mode = if config.window.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: (CANVAS_W as f32, CANVAS_H as f32).into(),
                        present_mode,
                        // Track coordinates map 1:1 onto the frame image
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(GameController::new(selection))
        .insert_resource(GameRng::new(config.game.seed))
        .insert_resource(ConfigWarnings(warnings))
        .insert_resource(config)
        .init_state::<GameState>()
        .add_plugins((DisplayPlugin, GameLoopPlugin, ControlsPlugin, HudPlugin, ServicePlugin))
        .add_systems(Startup, report_config_warnings)
        .run();
}

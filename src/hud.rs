use crate::game_loop::{GameController, GameState};
use crate::game_logic::{CANVAS_H, CANVAS_W, FRAMES_PER_SECOND};
use crate::services::ServiceStatus;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::fmt::Write;

const LEADERBOARD_ROWS: usize = 5;
const ONLINE_NAMES: usize = 5;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct OverlayText;

#[derive(Component)]
pub struct OverlayBackdrop;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(
                PostUpdate,
                (update_hud, update_overlay.run_if(overlay_screen)),
            )
            .add_systems(OnEnter(GameState::Playing), hide_overlay);
    }
}

fn setup_hud(mut commands: Commands) {
    let left = -(CANVAS_W as f32) / 2.0 + 10.0;
    let top = CANVAS_H as f32 / 2.0 - 10.0;

    commands.spawn((
        Text2d::new(""),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Anchor::TopLeft,
        Transform::from_xyz(left, top, 2.),
        HudText,
    ));
    commands.spawn((
        Sprite::from_color(Color::srgba(0., 0., 0., 0.75), Vec2::new(560., 360.)),
        Transform::from_xyz(0., 0., 1.),
        Visibility::Visible,
        OverlayBackdrop,
    ));
    commands.spawn((
        Text2d::new(""),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0., 0., 2.),
        OverlayText,
    ));
}

/// Score, time, best, streak and the service status line.
pub fn hud_text(controller: &GameController, status: &ServiceStatus) -> String {
    let mut text = format!(
        "Score: {}\nTime: {}s\nBest: {}",
        controller.score(),
        controller.time() / FRAMES_PER_SECOND,
        controller.best_score()
    );
    if controller.streak() > 0 {
        let _ = write!(text, "\nDRIFT x{}", controller.streak());
    }
    if let Some(user) = &status.user {
        let _ = write!(text, "\n{} (level {})", user.username, user.level);
    }
    if let Some(message) = &status.message {
        let _ = write!(text, "\n{message}");
    }
    text
}

/// Centered screen text for the current state. Empty while driving.
pub fn overlay_text(controller: &GameController, status: &ServiceStatus) -> String {
    let selection = controller.selection();
    let track = selection.track();
    let car = selection.archetype();
    let colors = selection.colors();

    let mut text = match controller.state() {
        GameState::Playing => return String::new(),
        GameState::Menu => format!(
            "DRIFT MASTER 2D\n\n{} / {} / {}\n\nEnter: start   M: map   C: car   L: leaderboard",
            track.name, car.name, colors.name
        ),
        GameState::MapSelect => format!(
            "< {} >\n{} - {}\n\nLeft/Right: browse   Enter: select   Esc: back",
            track.name,
            track.difficulty.label(),
            track.description
        ),
        GameState::CarCustomize => {
            let r = &car.ratings;
            format!(
                "< {} >\n{}\n{}\nSpeed {}  Accel {}  Handling {}  Drift {}\n\n^ {} v\n\nLeft/Right: car   Up/Down: color   Esc: back",
                car.name,
                car.category,
                car.description,
                r.speed,
                r.acceleration,
                r.handling,
                r.drift,
                colors.name
            )
        }
        GameState::Paused => "PAUSED\n\nP: resume   R: back to menu".to_string(),
        GameState::GameOver => format!(
            "GAME OVER\nScore: {}\n\nR: back to menu",
            controller.score()
        ),
    };

    if matches!(controller.state(), GameState::Menu | GameState::MapSelect) && !status.leaderboard.is_empty() {
        let title = status.leaderboard_track.as_deref().unwrap_or("Global");
        let _ = write!(text, "\n\n{title} leaderboard");
        for entry in status.leaderboard.iter().take(LEADERBOARD_ROWS) {
            let _ = write!(text, "\n{}. {}  {}", entry.rank, entry.username, entry.score);
        }
    }
    if controller.state() == GameState::Menu {
        text.push_str("\n\n");
        text.push_str(&online_line(status));
    }
    text
}

fn online_line(status: &ServiceStatus) -> String {
    if !status.connected {
        return "Offline".to_string();
    }
    let names: Vec<&str> = status
        .online_users
        .iter()
        .take(ONLINE_NAMES)
        .map(|user| user.username.as_str())
        .collect();
    let mut line = format!("{} online", status.online_users.len());
    if !names.is_empty() {
        let _ = write!(line, ": {}", names.join(", "));
    }
    line
}

fn update_hud(
    controller: Res<GameController>,
    status: Res<ServiceStatus>,
    mut hud: Query<&mut Text2d, With<HudText>>,
) {
    for mut text in &mut hud {
        let next = hud_text(&controller, &status);
        if text.0 != next {
            text.0 = next;
        }
    }
}

/// Overlay screens are every state but driving. Reads Bevy's mirror of the controller.
fn overlay_screen(state: Res<State<GameState>>) -> bool {
    *state.get() != GameState::Playing
}

fn hide_overlay(
    mut overlay: Query<&mut Text2d, With<OverlayText>>,
    mut backdrop: Query<&mut Visibility, With<OverlayBackdrop>>,
) {
    for mut shown in &mut backdrop {
        shown.set_if_neq(Visibility::Hidden);
    }
    for mut text in &mut overlay {
        text.0.clear();
    }
}

fn update_overlay(
    controller: Res<GameController>,
    status: Res<ServiceStatus>,
    mut overlay: Query<&mut Text2d, With<OverlayText>>,
    mut backdrop: Query<&mut Visibility, With<OverlayBackdrop>>,
) {
    let next = overlay_text(&controller, &status);
    let visible = if next.is_empty() {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };
    for mut shown in &mut backdrop {
        shown.set_if_neq(visible);
    }
    for mut text in &mut overlay {
        if text.0 != next {
            text.0 = next.clone();
        }
    }
}

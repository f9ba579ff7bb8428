use crate::config::GameConfig;
use crate::game_loop::{GameController, GameState};
use crate::game_logic::{InputSampler, SessionSummary};
use crate::services::{ScoreSubmission, ServiceRequest, ServiceStatus, ServiceWorker};
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::window::WindowFocused;

/// Keys that drive menus and the session, as opposed to the car.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Enter,
    Escape,
    MapSelect,
    Customize,
    Pause,
    Reset,
    Leaderboard,
    Left,
    Right,
    Up,
    Down,
}

const MENU_KEYS: [(KeyCode, MenuKey); 11] = [
    (KeyCode::Enter, MenuKey::Enter),
    (KeyCode::Escape, MenuKey::Escape),
    (KeyCode::KeyM, MenuKey::MapSelect),
    (KeyCode::KeyC, MenuKey::Customize),
    (KeyCode::KeyP, MenuKey::Pause),
    (KeyCode::KeyR, MenuKey::Reset),
    (KeyCode::KeyL, MenuKey::Leaderboard),
    (KeyCode::ArrowLeft, MenuKey::Left),
    (KeyCode::ArrowRight, MenuKey::Right),
    (KeyCode::ArrowUp, MenuKey::Up),
    (KeyCode::ArrowDown, MenuKey::Down),
];

/// Follow-up work a key press asks of the outside world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyEffect {
    None,
    SessionEnded(SessionSummary),
    /// `Some(track)` while browsing maps, `None` for the global board.
    LeaderboardRequested(Option<&'static str>),
}

/// Apply one menu key to the controller, according to the screen it's on.
pub fn apply_menu_key(controller: &mut GameController, key: MenuKey) -> KeyEffect {
    if key == MenuKey::Leaderboard {
        let track = (controller.state() == GameState::MapSelect).then(|| controller.selection().track().name);
        return KeyEffect::LeaderboardRequested(track);
    }

    let selection = controller.selection();
    match (controller.state(), key) {
        (GameState::Menu, MenuKey::Enter) => {
            controller.start();
        }
        (GameState::Menu, MenuKey::MapSelect) => {
            controller.show_map_select();
        }
        (GameState::Menu, MenuKey::Customize) => {
            controller.show_car_customize();
        }
        (GameState::MapSelect, MenuKey::Left) => {
            let mut next = selection;
            next.prev_track();
            controller.browse_track(next.track);
        }
        (GameState::MapSelect, MenuKey::Right) => {
            let mut next = selection;
            next.next_track();
            controller.browse_track(next.track);
        }
        (GameState::MapSelect, MenuKey::Enter) => {
            controller.select_track(selection.track);
        }
        (GameState::CarCustomize, MenuKey::Left) => {
            let mut next = selection;
            next.prev_car();
            controller.select_car(next.car);
        }
        (GameState::CarCustomize, MenuKey::Right) => {
            let mut next = selection;
            next.next_car();
            controller.select_car(next.car);
        }
        (GameState::CarCustomize, MenuKey::Up) => {
            let mut next = selection;
            next.prev_color();
            controller.select_color(next.color);
        }
        (GameState::CarCustomize, MenuKey::Down) => {
            let mut next = selection;
            next.next_color();
            controller.select_color(next.color);
        }
        (GameState::MapSelect | GameState::CarCustomize, MenuKey::Escape)
        | (GameState::CarCustomize, MenuKey::Enter) => {
            controller.back_to_menu();
        }
        (GameState::Playing | GameState::Paused, MenuKey::Pause) => {
            controller.toggle_pause();
        }
        (GameState::Playing | GameState::Paused | GameState::GameOver, MenuKey::Reset) => {
            return match controller.reset() {
                Some(summary) => KeyEffect::SessionEnded(summary),
                None => KeyEffect::None,
            };
        }
        _ => {}
    }
    KeyEffect::None
}

pub fn leaderboard_request(track: Option<&str>, limit: u32) -> ServiceRequest {
    match track {
        Some(track) => ServiceRequest::TrackLeaderboard {
            track: track.to_string(),
            limit,
        },
        None => ServiceRequest::GlobalLeaderboard { limit },
    }
}

/// Raw key name as the input sampler knows it, for the keys it cares about.
fn sampler_key(key: &Key) -> Option<&str> {
    match key {
        Key::Character(c) => Some(c.as_str()),
        Key::ArrowUp => Some("ArrowUp"),
        Key::ArrowDown => Some("ArrowDown"),
        Key::ArrowLeft => Some("ArrowLeft"),
        Key::ArrowRight => Some("ArrowRight"),
        _ => None,
    }
}

pub fn sample_keyboard(mut events: EventReader<KeyboardInput>, mut sampler: ResMut<InputSampler>) {
    for event in events.read() {
        let Some(name) = sampler_key(&event.logical_key) else {
            continue;
        };
        match event.state {
            ButtonState::Pressed => sampler.press(name),
            ButtonState::Released => sampler.release(name),
        }
    }
}

/// Release events go to whichever window has focus, so drop every held key on blur.
pub fn release_on_focus_loss(mut events: EventReader<WindowFocused>, mut sampler: ResMut<InputSampler>) {
    for event in events.read() {
        if !event.focused {
            sampler.release_all();
        }
    }
}

pub fn handle_menu_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<GameController>,
    worker: Option<Res<ServiceWorker>>,
    config: Res<GameConfig>,
    mut status: ResMut<ServiceStatus>,
) {
    for (code, key) in MENU_KEYS {
        if !keys.just_pressed(code) {
            continue;
        }
        match apply_menu_key(&mut controller, key) {
            KeyEffect::None => {}
            KeyEffect::SessionEnded(summary) => {
                info!(
                    "Session over: {} points on {} in the {}",
                    summary.score, summary.track, summary.car
                );
                if let Some(worker) = worker.as_deref() {
                    if status.user.is_some() || config.service.token.is_some() {
                        worker.send(ServiceRequest::SubmitScore(ScoreSubmission::from(&summary)));
                    } else {
                        status.message = Some("Log in to submit scores".to_string());
                    }
                }
            }
            KeyEffect::LeaderboardRequested(track) => match worker.as_deref() {
                Some(worker) => {
                    worker.send(leaderboard_request(track, config.service.leaderboard_limit));
                }
                None => status.message = Some("Leaderboard unavailable offline".to_string()),
            },
        }
    }
}

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (release_on_focus_loss, sample_keyboard).chain().after(bevy::input::InputSystem),
        )
        .add_systems(Update, handle_menu_keys.before(crate::game_loop::run_frame));
    }
}

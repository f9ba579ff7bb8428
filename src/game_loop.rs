use crate::game_logic::{
    ARCHETYPES, COLOR_SCHEMES, InputSampler, PhysicsInput, Selection, Session, SessionSummary,
    StepReport, TRACKS,
};
use crate::render::{FrameSurface, RenderOutcome, Scene, render_frame};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    MapSelect,
    CarCustomize,
    Playing,
    Paused,
    // Reserved for a finish condition; nothing transitions here yet
    GameOver,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Menu => "Menu",
            GameState::MapSelect => "Map Select",
            GameState::CarCustomize => "Car Customize",
            GameState::Playing => "Playing",
            GameState::Paused => "Paused",
            GameState::GameOver => "Game Over",
        }
    }

    /// States where the car, track or paint can't change under the driver.
    pub fn in_session(&self) -> bool {
        matches!(self, GameState::Playing | GameState::Paused)
    }
}

/// Shared cancellation flag for the frame loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct LoopToken(Arc<AtomicBool>);

impl LoopToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Loop running, but nothing to simulate in this state.
    Idle,
    Stepped(StepReport),
    /// No loop started, or it was torn down.
    Cancelled,
}

/// Owns the game state machine and the live session.
///
/// Score, time and streak all live on the session, so dropping the session zeroes them.
#[derive(Resource, Debug, Default)]
pub struct GameController {
    state: GameState,
    selection: Selection,
    session: Option<Session>,
    best_score: u64,
    token: Option<LoopToken>,
}

impl GameController {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn score(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.score.score)
    }

    /// Frames simulated this session.
    pub fn time(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.frames)
    }

    pub fn streak(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score.streak)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Arm the loop with a fresh token. Any token handed out earlier is cancelled.
    pub fn start_loop(&mut self) -> LoopToken {
        self.stop_loop();
        let token = LoopToken::default();
        self.token = Some(token.clone());
        token
    }

    pub fn stop_loop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Menu to playing with a brand new session. Returns false from any other state.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        self.session = Some(Session::start(self.selection));
        self.state = GameState::Playing;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        };
    }

    /// Back to the menu from anywhere, banking the score into the best score.
    ///
    /// Returns the finished session's summary when it scored anything.
    pub fn reset(&mut self) -> Option<SessionSummary> {
        self.state = GameState::Menu;
        let summary = self.session.take()?.summary();
        self.best_score = self.best_score.max(summary.score);
        (summary.score > 0).then_some(summary)
    }

    pub fn show_map_select(&mut self) -> bool {
        self.enter_from_menu(GameState::MapSelect)
    }

    pub fn show_car_customize(&mut self) -> bool {
        self.enter_from_menu(GameState::CarCustomize)
    }

    fn enter_from_menu(&mut self, next: GameState) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        self.state = next;
        true
    }

    pub fn back_to_menu(&mut self) -> bool {
        if !matches!(self.state, GameState::MapSelect | GameState::CarCustomize) {
            return false;
        }
        self.state = GameState::Menu;
        true
    }

    /// Change the highlighted track without leaving the map screen.
    pub fn browse_track(&mut self, index: usize) -> bool {
        self.update_selection(|s| s.track = index)
    }

    /// Commit a track and return to the menu.
    pub fn select_track(&mut self, index: usize) -> bool {
        let changed = self.update_selection(|s| s.track = index);
        if changed {
            self.state = GameState::Menu;
        }
        changed
    }

    pub fn select_car(&mut self, index: usize) -> bool {
        self.update_selection(|s| s.car = index)
    }

    pub fn select_color(&mut self, index: usize) -> bool {
        self.update_selection(|s| s.color = index)
    }

    fn update_selection(&mut self, change: impl FnOnce(&mut Selection)) -> bool {
        if self.state.in_session() {
            return false;
        }
        let mut next = self.selection;
        change(&mut next);
        // Out-of-range indexes are rejected rather than silently falling back
        let valid = next.track < TRACKS.len()
            && next.car < ARCHETYPES.len()
            && next.color < COLOR_SCHEMES.len();
        if valid {
            self.selection = next;
        }
        valid
    }

    /// One display refresh. Only a playing session advances and gets drawn.
    pub fn tick<R, F>(&mut self, input: &PhysicsInput, rng: &mut R, render: F) -> TickOutcome
    where
        R: Rng + ?Sized,
        F: FnOnce(&Session),
    {
        if !self.is_running() {
            return TickOutcome::Cancelled;
        }
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };
        let report = session.step(input, rng);
        render(session);
        TickOutcome::Stepped(report)
    }
}

/// Randomness for the simulation and, separately, for purely visual jitter,
/// so a seeded run replays the same physics whatever gets drawn.
#[derive(Resource)]
pub struct GameRng {
    pub physics: StdRng,
    pub effects: StdRng,
}

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self {
                physics: StdRng::seed_from_u64(seed),
                effects: StdRng::seed_from_u64(seed.rotate_left(32)),
            },
            None => Self {
                physics: StdRng::from_os_rng(),
                effects: StdRng::from_os_rng(),
            },
        }
    }
}

pub struct GameLoopPlugin;

impl Plugin for GameLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSampler>()
            .add_systems(Startup, start_frame_loop)
            .add_systems(Update, (run_frame, sync_game_state).chain())
            .add_systems(Last, stop_frame_loop);
    }
}

fn start_frame_loop(mut controller: ResMut<GameController>) {
    controller.start_loop();
    info!("Frame loop started");
}

pub fn run_frame(
    mut controller: ResMut<GameController>,
    input: Res<InputSampler>,
    mut rng: ResMut<GameRng>,
    mut surface: ResMut<FrameSurface>,
) {
    let GameRng { physics, effects } = &mut *rng;
    let controls = input.controls();
    let outcome = controller.tick(&controls, physics, |session| {
        let scene = Scene::from_session(session);
        if render_frame(&scene, &mut surface, effects) == RenderOutcome::Skipped {
            debug!("No drawing surface, frame skipped");
        }
    });

    if let TickOutcome::Stepped(report) = outcome {
        if report.points > 0 {
            debug!("Drift +{} (streak {})", report.points, controller.streak());
        }
    }
}

/// Mirror the controller's state into Bevy's. The HUD gates its overlay on the mirror.
fn sync_game_state(
    controller: Res<GameController>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if controller.state() != *state.get() {
        info!("{} -> {}", state.get().label(), controller.state().label());
        next_state.set(controller.state());
    }
}

fn stop_frame_loop(mut exits: EventReader<AppExit>, mut controller: ResMut<GameController>) {
    if exits.read().next().is_some() {
        controller.stop_loop();
        info!("Frame loop stopped");
    }
}

use crate::game_logic::{
    ARCHETYPES, Archetype, COLOR_SCHEMES, ColorScheme, DriftScore, ParticleSystem, PhysicsInput,
    StepReport, TRACKS, Track, VehicleState, apply_physics,
};
use rand::Rng;

fn step_forward(index: usize, len: usize) -> usize {
    (index + 1) % len
}

fn step_back(index: usize, len: usize) -> usize {
    if index == 0 { len - 1 } else { index - 1 }
}

fn position_named<T>(items: &[T], name: &str, name_of: impl Fn(&T) -> &str) -> Option<usize> {
    items
        .iter()
        .position(|item| name_of(item).eq_ignore_ascii_case(name))
}

/// Which track, car and paint the next session uses. Indexes into the static catalogs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub track: usize,
    pub car: usize,
    pub color: usize,
}

impl Selection {
    pub fn track(&self) -> &'static Track {
        TRACKS.get(self.track).unwrap_or(&TRACKS[0])
    }

    pub fn archetype(&self) -> &'static Archetype {
        ARCHETYPES.get(self.car).unwrap_or(&ARCHETYPES[0])
    }

    pub fn colors(&self) -> &'static ColorScheme {
        COLOR_SCHEMES.get(self.color).unwrap_or(&COLOR_SCHEMES[0])
    }

    pub fn next_track(&mut self) {
        self.track = step_forward(self.track, TRACKS.len());
    }

    pub fn prev_track(&mut self) {
        self.track = step_back(self.track, TRACKS.len());
    }

    pub fn next_car(&mut self) {
        self.car = step_forward(self.car, ARCHETYPES.len());
    }

    pub fn prev_car(&mut self) {
        self.car = step_back(self.car, ARCHETYPES.len());
    }

    pub fn next_color(&mut self) {
        self.color = step_forward(self.color, COLOR_SCHEMES.len());
    }

    pub fn prev_color(&mut self) {
        self.color = step_back(self.color, COLOR_SCHEMES.len());
    }

    /// Point at the track with this name. Returns false and leaves the selection alone if none matches.
    pub fn select_track_named(&mut self, name: &str) -> bool {
        position_named(&TRACKS, name, |t| t.name)
            .map(|index| self.track = index)
            .is_some()
    }

    pub fn select_car_named(&mut self, name: &str) -> bool {
        position_named(&ARCHETYPES, name, |a| a.name)
            .map(|index| self.car = index)
            .is_some()
    }

    pub fn select_color_named(&mut self, name: &str) -> bool {
        position_named(&COLOR_SCHEMES, name, |c| c.name)
            .map(|index| self.color = index)
            .is_some()
    }
}

/// Everything a finished session reports for score submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub drift_frames: u64,
    pub frames: u64,
    pub track: &'static str,
    pub car: &'static str,
    pub color: &'static str,
}

/// One drive: car, smoke and score on a fixed track with a fixed car.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    selection: Selection,
    pub vehicle: VehicleState,
    pub particles: ParticleSystem,
    pub score: DriftScore,
    pub frames: u64,
}

impl Session {
    pub fn start(selection: Selection) -> Self {
        Self {
            selection,
            vehicle: VehicleState::spawn(selection.track().start.as_ref()),
            particles: ParticleSystem::default(),
            score: DriftScore::default(),
            frames: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn track(&self) -> &'static Track {
        self.selection.track()
    }

    pub fn archetype(&self) -> &'static Archetype {
        self.selection.archetype()
    }

    pub fn colors(&self) -> &'static ColorScheme {
        self.selection.colors()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, input: &PhysicsInput, rng: &mut R) -> StepReport {
        let report = apply_physics(
            &mut self.vehicle,
            &mut self.particles,
            &mut self.score,
            self.selection.archetype(),
            self.selection.track(),
            input,
            rng,
        );
        self.frames += 1;
        report
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score.score,
            drift_frames: self.score.drift_frames,
            frames: self.frames,
            track: self.track().name,
            car: self.archetype().name,
            color: self.colors().name,
        }
    }
}

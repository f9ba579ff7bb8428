pub mod car;
pub mod effects;
pub mod paint;
pub mod track;

use crate::game_logic::{Archetype, ColorScheme, ParticleSystem, Session, Track, VehicleState};
use bevy::prelude::*;
use rand::Rng;
use tiny_skia::Pixmap;

/// Borrowed view of everything one frame draws. Rendering never mutates it.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub track: &'a Track,
    pub vehicle: &'a VehicleState,
    pub particles: &'a ParticleSystem,
    pub archetype: &'a Archetype,
    pub colors: &'a ColorScheme,
}

impl<'a> Scene<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            track: session.track(),
            vehicle: &session.vehicle,
            particles: &session.particles,
            archetype: session.archetype(),
            colors: session.colors(),
        }
    }
}

/// Software framebuffer the game draws into. Empty when the window has no usable size.
#[derive(Resource, Default)]
pub struct FrameSurface {
    pixmap: Option<Pixmap>,
    dirty: bool,
}

impl FrameSurface {
    /// A surface of the given size, or a detached one if either side is zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            dirty: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.pixmap.is_some()
    }

    /// RGBA bytes of the last frame. Opaque, so premultiplied equals straight alpha.
    pub fn data(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(Pixmap::data)
    }

    /// True once per newly drawn frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    /// No surface to draw on; nothing happened.
    Skipped,
}

/// Paint a full frame, back to front. `rng` only feeds cosmetic jitter.
pub fn render_frame<R: Rng + ?Sized>(scene: &Scene, surface: &mut FrameSurface, rng: &mut R) -> RenderOutcome {
    let Some(pixmap) = surface.pixmap.as_mut() else {
        return RenderOutcome::Skipped;
    };

    track::draw_track(pixmap, scene.track);
    effects::draw_smoke(pixmap, scene.particles);
    car::draw_car(pixmap, scene.vehicle, scene.archetype, scene.colors);
    if scene.vehicle.is_drifting {
        effects::draw_sparks(pixmap, scene.vehicle, rng);
    }
    effects::draw_speed_lines(pixmap, scene.vehicle);

    surface.dirty = true;
    RenderOutcome::Drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{CANVAS_H, CANVAS_W, PhysicsInput, Selection};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn driven_session() -> Session {
        let mut session = Session::start(Selection::default());
        let mut rng = StdRng::seed_from_u64(8);
        let input = PhysicsInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..90 {
            session.step(&input, &mut rng);
        }
        session
    }

    #[test]
    fn detached_surface_skips_the_frame() {
        let session = Session::start(Selection::default());
        let mut surface = FrameSurface::new(0, CANVAS_H);
        assert!(!surface.is_attached());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            render_frame(&Scene::from_session(&session), &mut surface, &mut rng),
            RenderOutcome::Skipped
        );
        assert!(!surface.take_dirty());
    }

    #[test]
    fn classic_backdrop_starts_dark_grey() {
        let session = Session::start(Selection::default());
        let mut surface = FrameSurface::new(CANVAS_W, CANVAS_H);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            render_frame(&Scene::from_session(&session), &mut surface, &mut rng),
            RenderOutcome::Drawn
        );
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());

        let corner = &surface.data().expect("drawn frame")[..4];
        for channel in &corner[..3] {
            assert!(channel.abs_diff(0x1a) <= 2, "channel {channel:#x}");
        }
        assert_eq!(corner[3], 255);
    }

    #[test]
    fn rendering_leaves_the_scene_alone() {
        let session = driven_session();
        let before = session.clone();
        let mut surface = FrameSurface::new(CANVAS_W, CANVAS_H);
        let mut rng = StdRng::seed_from_u64(0);
        render_frame(&Scene::from_session(&session), &mut surface, &mut rng);
        assert_eq!(session, before);
    }

    #[test]
    fn every_pixel_is_opaque() {
        let session = driven_session();
        let mut surface = FrameSurface::new(CANVAS_W, CANVAS_H);
        let mut rng = StdRng::seed_from_u64(0);
        render_frame(&Scene::from_session(&session), &mut surface, &mut rng);
        let data = surface.data().expect("attached");
        assert!(data.chunks_exact(4).all(|px| px[3] == 255));
    }
}

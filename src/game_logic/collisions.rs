use crate::game_logic::Track;
use bevy::prelude::*;

/// Keep the car's center off the walls, one car half-width away from each.
///
/// Walls are checked left, right, top, bottom; on a track narrower than the car
/// the later check wins.
pub fn clamp_to_track(position: &mut Vec2, track: &Track) {
    let area = track.drivable_area();

    if position.x < area.min.x {
        position.x = area.min.x;
    }
    if position.x > area.max.x {
        position.x = area.max.x;
    }
    if position.y < area.min.y {
        position.y = area.min.y;
    }
    if position.y > area.max.y {
        position.y = area.max.y;
    }
}

use crate::game_logic::SCORING_MIN_SPEED;

/// Running drift score for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriftScore {
    pub score: u64,
    /// Consecutive scoring frames, zeroed on the first frame that doesn't score.
    pub streak: u32,
    /// Total scoring frames this session.
    pub drift_frames: u64,
}

/// Points for one frame of drifting. Truncated, never negative.
pub fn drift_points(drift_angle: f32, speed: f32, multiplier: f32) -> u64 {
    let raw = (drift_angle * speed * multiplier).floor();
    if raw.is_finite() && raw > 0.0 { raw as u64 } else { 0 }
}

impl DriftScore {
    /// Book one frame. Returns the points it earned.
    pub fn record(&mut self, drifting: bool, drift_angle: f32, speed: f32, multiplier: f32) -> u64 {
        if drifting && speed > SCORING_MIN_SPEED {
            let points = drift_points(drift_angle, speed, multiplier);
            self.score = self.score.saturating_add(points);
            self.streak = self.streak.saturating_add(1);
            self.drift_frames += 1;
            points
        } else {
            self.streak = 0;
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn points_are_floored() {
        assert_eq!(drift_points(0.5, 5.0, 18.0), 45);
        assert_eq!(drift_points(0.31, 3.1, 15.0), 14);
        assert_eq!(drift_points(0.0, 9.0, 20.0), 0);
    }

    #[test]
    fn slow_drift_breaks_the_streak() {
        let mut score = DriftScore::default();
        score.record(true, 0.5, 4.0, 10.0);
        score.record(true, 0.5, 4.0, 10.0);
        assert_eq!(score.streak, 2);
        assert_eq!(score.score, 40);

        assert_eq!(score.record(true, 0.5, 2.0, 10.0), 0);
        assert_eq!(score.streak, 0);
        assert_eq!(score.score, 40);
        assert_eq!(score.drift_frames, 2);
    }

    proptest! {
        #[test]
        fn score_never_decreases(
            frames in prop::collection::vec((any::<bool>(), 0.0f32..3.2, -5.0f32..11.0), 1..80),
        ) {
            let mut score = DriftScore::default();
            for (drifting, angle, speed) in frames {
                let before = score;
                score.record(drifting, angle, speed, 15.0);
                prop_assert!(score.score >= before.score);
                if drifting && speed > SCORING_MIN_SPEED {
                    prop_assert_eq!(score.streak, before.streak + 1);
                } else {
                    prop_assert_eq!(score.streak, 0);
                }
            }
        }
    }
}

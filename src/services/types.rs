use crate::game_logic::{FRAMES_PER_SECOND, SessionSummary};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/game/score`. Durations are whole seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub score: u64,
    pub drift_time: u64,
    pub track_name: String,
    pub car_used: String,
    pub color_used: String,
    pub game_duration: u64,
}

impl From<&SessionSummary> for ScoreSubmission {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            score: summary.score,
            drift_time: summary.drift_frames / FRAMES_PER_SECOND,
            track_name: summary.track.to_string(),
            car_used: summary.car.to_string(),
            color_used: summary.color.to_string(),
            game_duration: summary.frames / FRAMES_PER_SECOND,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub experience_gained: u64,
    pub new_level: u32,
    #[serde(default)]
    pub new_achievements: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub score: u64,
    pub track_name: String,
    pub car_used: String,
    pub color_used: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OnlineUser {
    pub id: String,
    pub username: String,
    pub level: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub best_score: u64,
    #[serde(default)]
    pub games_played: u64,
    #[serde(default = "first_level")]
    pub level: u32,
}

fn first_level() -> u32 {
    1
}

/// Response to login and registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

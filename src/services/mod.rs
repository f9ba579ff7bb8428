pub mod http;
pub mod types;
pub mod worker;

pub use http::{HttpScoreService, ScoreService, ServiceError};
pub use types::*;
pub use worker::{ServiceRequest, ServiceResponse, ServiceWorker, handle_request, spawn_service_worker};

use crate::config::{GameConfig, ServiceConfig};
use bevy::prelude::*;

pub struct ServicePlugin;

impl Plugin for ServicePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ServiceStatus>()
            .add_systems(Startup, start_service_worker)
            .add_systems(Update, process_service_responses)
            .add_systems(Last, logout_on_exit);
    }
}

/// What the game knows about the score server, for the HUD and menus.
#[derive(Resource, Debug, Default)]
pub struct ServiceStatus {
    pub connected: bool,
    pub user: Option<UserProfile>,
    /// Last thing worth telling the player, success or failure.
    pub message: Option<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_track: Option<String>,
    pub online_users: Vec<OnlineUser>,
}

impl ServiceStatus {
    /// Fold one response in. Failed requests only touch the message line.
    pub fn apply(&mut self, response: ServiceResponse) {
        match response {
            ServiceResponse::LoggedIn(session) => {
                self.message = Some(format!("Logged in as {}", session.user.username));
                self.user = Some(session.user);
            }
            ServiceResponse::LoggedOut => {
                self.user = None;
                self.message = Some("Logged out".to_string());
            }
            ServiceResponse::ScoreSubmitted(receipt) => {
                let mut message = format!("{} (+{} XP)", receipt.message, receipt.experience_gained);
                if !receipt.new_achievements.is_empty() {
                    message.push_str(&format!(", unlocked {}", receipt.new_achievements.join(", ")));
                }
                self.message = Some(message);
            }
            ServiceResponse::Leaderboard { track, entries } => {
                self.leaderboard = entries;
                self.leaderboard_track = track;
            }
            ServiceResponse::OnlineUsers(users) => {
                self.online_users = users;
            }
            ServiceResponse::Failed { request, error, .. } => {
                self.message = Some(format!("{request} failed: {error}"));
            }
        }
    }

    /// Logout to send on the way out, if anyone is logged in.
    pub fn logout_request(&self) -> Option<ServiceRequest> {
        self.user.as_ref().map(|_| ServiceRequest::Logout)
    }
}

/// Request a response calls for. A login rejected as unauthorized turns into a
/// registration when the config names the account to create.
pub fn follow_up(response: &ServiceResponse, settings: &ServiceConfig) -> Option<ServiceRequest> {
    let ServiceResponse::Failed {
        request: "login",
        status: Some(401 | 404),
        ..
    } = response
    else {
        return None;
    };
    let (Some(username), Some(email), Some(password)) = (&settings.username, &settings.email, &settings.password) else {
        return None;
    };
    Some(ServiceRequest::Register(Registration {
        username: username.clone(),
        email: email.clone(),
        password: password.clone(),
    }))
}

fn start_service_worker(mut commands: Commands, config: Res<GameConfig>, mut status: ResMut<ServiceStatus>) {
    let settings = &config.service;
    if !settings.enabled {
        info!("Score service disabled, playing offline");
        return;
    }

    let service = match HttpScoreService::new(&settings.base_url, settings.token.clone()) {
        Ok(service) => service,
        Err(e) => {
            warn!("Score service unavailable: {}", e);
            status.message = Some(format!("Offline: {e}"));
            return;
        }
    };
    let worker = match spawn_service_worker(service) {
        Ok(worker) => worker,
        Err(e) => {
            warn!("Could not start score service thread: {}", e);
            status.message = Some("Offline".to_string());
            return;
        }
    };

    if settings.token.is_none() {
        if let (Some(email), Some(password)) = (&settings.email, &settings.password) {
            worker.send(ServiceRequest::Login(Credentials {
                email: email.clone(),
                password: password.clone(),
            }));
        }
    }
    worker.send(ServiceRequest::OnlineUsers);

    info!("Score service at {}", settings.base_url);
    status.connected = true;
    commands.insert_resource(worker);
}

fn process_service_responses(
    worker: Option<Res<ServiceWorker>>,
    config: Res<GameConfig>,
    mut status: ResMut<ServiceStatus>,
) {
    let Some(worker) = worker else {
        return;
    };
    for response in worker.drain() {
        if let Some(request) = follow_up(&response, &config.service) {
            info!("No account for {}, registering", config.service.email.as_deref().unwrap_or_default());
            worker.send(request);
        }
        match &response {
            ServiceResponse::Failed { request, error, .. } => warn!("Score service {} failed: {}", request, error),
            ServiceResponse::Leaderboard { track, entries } => info!(
                "Leaderboard {}: {} entries",
                track.as_deref().unwrap_or("global"),
                entries.len()
            ),
            other => debug!("Score service: {:?}", other),
        }
        status.apply(response);
    }
}

fn logout_on_exit(
    mut exits: EventReader<AppExit>,
    worker: Option<Res<ServiceWorker>>,
    status: Res<ServiceStatus>,
) {
    if exits.read().next().is_none() {
        return;
    }
    if let (Some(worker), Some(request)) = (worker, status.logout_request()) {
        info!("Logging out of the score service");
        worker.send(request);
    }
}

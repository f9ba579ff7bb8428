use crate::services::http::ScoreService;
use crate::services::types::{
    AuthSession, Credentials, LeaderboardEntry, OnlineUser, Registration, ScoreSubmission,
    SubmissionReceipt,
};
use bevy::prelude::Resource;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    Login(Credentials),
    Register(Registration),
    Logout,
    SubmitScore(ScoreSubmission),
    GlobalLeaderboard { limit: u32 },
    TrackLeaderboard { track: String, limit: u32 },
    OnlineUsers,
    Shutdown,
}

impl ServiceRequest {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceRequest::Login(_) => "login",
            ServiceRequest::Register(_) => "register",
            ServiceRequest::Logout => "logout",
            ServiceRequest::SubmitScore(_) => "score submission",
            ServiceRequest::GlobalLeaderboard { .. } => "global leaderboard",
            ServiceRequest::TrackLeaderboard { .. } => "track leaderboard",
            ServiceRequest::OnlineUsers => "online users",
            ServiceRequest::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    LoggedIn(AuthSession),
    LoggedOut,
    ScoreSubmitted(SubmissionReceipt),
    /// `track` is `None` for the global board.
    Leaderboard {
        track: Option<String>,
        entries: Vec<LeaderboardEntry>,
    },
    OnlineUsers(Vec<OnlineUser>),
    Failed {
        request: &'static str,
        /// HTTP status when the server answered with an error.
        status: Option<u16>,
        error: String,
    },
}

/// Handle to the background thread that talks to the score server.
///
/// Dropping it queues a shutdown behind whatever was already sent and joins the
/// thread, so requests queued before the drop (a logout on exit) still reach the
/// server. That can hold app exit for up to the HTTP timeout per queued request.
#[derive(Resource)]
pub struct ServiceWorker {
    requests: Sender<ServiceRequest>,
    responses: Mutex<Receiver<ServiceResponse>>,
    handle: Option<JoinHandle<()>>,
}

pub fn spawn_service_worker<S>(service: S) -> std::io::Result<ServiceWorker>
where
    S: ScoreService + 'static,
{
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("score-service".into())
        .spawn(move || serve(service, request_rx, response_tx))?;

    Ok(ServiceWorker {
        requests: request_tx,
        responses: Mutex::new(response_rx),
        handle: Some(handle),
    })
}

fn serve<S: ScoreService>(mut service: S, requests: Receiver<ServiceRequest>, responses: Sender<ServiceResponse>) {
    for request in requests {
        if matches!(request, ServiceRequest::Shutdown) {
            break;
        }
        let response = handle_request(&mut service, request);
        if responses.send(response).is_err() {
            break;
        }
    }
}

/// Run one request to completion. Errors become `Failed` responses, never panics.
pub fn handle_request<S: ScoreService + ?Sized>(service: &mut S, request: ServiceRequest) -> ServiceResponse {
    let label = request.label();
    let result = match request {
        ServiceRequest::Login(credentials) => service.login(&credentials).map(ServiceResponse::LoggedIn),
        ServiceRequest::Register(registration) => service.register(&registration).map(ServiceResponse::LoggedIn),
        ServiceRequest::Logout => service.logout().map(|_| ServiceResponse::LoggedOut),
        ServiceRequest::SubmitScore(submission) => service
            .submit_score(&submission)
            .map(ServiceResponse::ScoreSubmitted),
        ServiceRequest::GlobalLeaderboard { limit } => service
            .global_leaderboard(limit)
            .map(|entries| ServiceResponse::Leaderboard { track: None, entries }),
        ServiceRequest::TrackLeaderboard { track, limit } => {
            service
                .track_leaderboard(&track, limit)
                .map(|entries| ServiceResponse::Leaderboard {
                    track: Some(track),
                    entries,
                })
        }
        ServiceRequest::OnlineUsers => service.online_users().map(ServiceResponse::OnlineUsers),
        ServiceRequest::Shutdown => {
            return ServiceResponse::Failed {
                request: label,
                status: None,
                error: "worker is shutting down".into(),
            };
        }
    };
    result.unwrap_or_else(|e| ServiceResponse::Failed {
        request: label,
        status: e.status(),
        error: e.to_string(),
    })
}

impl ServiceWorker {
    /// Queue a request. Returns false if the worker thread is gone.
    pub fn send(&self, request: ServiceRequest) -> bool {
        self.requests.send(request).is_ok()
    }

    /// Everything that has come back so far, without blocking.
    pub fn drain(&self) -> Vec<ServiceResponse> {
        let Ok(responses) = self.responses.lock() else {
            return Vec::new();
        };
        responses.try_iter().collect()
    }

    #[cfg(test)]
    fn wait(&self) -> Option<ServiceResponse> {
        let responses = self.responses.lock().ok()?;
        responses.recv_timeout(std::time::Duration::from_secs(5)).ok()
    }
}

impl Drop for ServiceWorker {
    fn drop(&mut self) {
        let _ = self.requests.send(ServiceRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::ServiceError;
    use crate::services::types::UserProfile;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory stand-in for the score server.
    #[derive(Default)]
    struct FakeService {
        token: Option<String>,
        scores: Vec<ScoreSubmission>,
        logged_out: Arc<AtomicBool>,
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            username: "driver".into(),
            email: "driver@example.com".into(),
            best_score: 0,
            games_played: 0,
            level: 1,
        }
    }

    impl ScoreService for FakeService {
        fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, ServiceError> {
            if credentials.password != "hunter2" {
                return Err(ServiceError::Status {
                    status: 401,
                    detail: "Invalid credentials".into(),
                });
            }
            self.token = Some("tok".into());
            Ok(AuthSession {
                access_token: "tok".into(),
                token_type: "bearer".into(),
                user: profile(),
            })
        }

        fn register(&mut self, registration: &Registration) -> Result<AuthSession, ServiceError> {
            self.login(&Credentials {
                email: registration.email.clone(),
                password: registration.password.clone(),
            })
        }

        fn logout(&mut self) -> Result<(), ServiceError> {
            self.token.take().ok_or(ServiceError::Unauthenticated)?;
            self.logged_out.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<SubmissionReceipt, ServiceError> {
            if self.token.is_none() {
                return Err(ServiceError::Unauthenticated);
            }
            self.scores.push(submission.clone());
            Ok(SubmissionReceipt {
                message: "Score submitted successfully".into(),
                experience_gained: submission.score / 10,
                new_level: 1,
                new_achievements: Vec::new(),
            })
        }

        fn global_leaderboard(&mut self, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError> {
            let mut entries: Vec<LeaderboardEntry> = self
                .scores
                .iter()
                .map(|s| LeaderboardEntry {
                    rank: 0,
                    username: "driver".into(),
                    score: s.score,
                    track_name: s.track_name.clone(),
                    car_used: s.car_used.clone(),
                    color_used: s.color_used.clone(),
                })
                .collect();
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(limit as usize);
            for (i, entry) in entries.iter_mut().enumerate() {
                entry.rank = i as u32 + 1;
            }
            Ok(entries)
        }

        fn track_leaderboard(&mut self, track: &str, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError> {
            let mut entries = self.global_leaderboard(u32::MAX)?;
            entries.retain(|e| e.track_name == track);
            entries.truncate(limit as usize);
            Ok(entries)
        }

        fn online_users(&mut self) -> Result<Vec<OnlineUser>, ServiceError> {
            Ok(vec![OnlineUser {
                id: "u1".into(),
                username: "driver".into(),
                level: 1,
            }])
        }
    }

    fn submission(score: u64) -> ScoreSubmission {
        ScoreSubmission {
            score,
            drift_time: 2,
            track_name: "Circuito Alpha".into(),
            car_used: "Mazda RX-7 FD".into(),
            color_used: "Classic Red".into(),
            game_duration: 30,
        }
    }

    #[test]
    fn failures_come_back_as_responses() {
        let mut service = FakeService::default();
        let response = handle_request(&mut service, ServiceRequest::SubmitScore(submission(10)));
        assert_eq!(
            response,
            ServiceResponse::Failed {
                request: "score submission",
                status: None,
                error: "not logged in".into(),
            }
        );
    }

    #[test]
    fn worker_round_trip_in_order() {
        let worker = spawn_service_worker(FakeService::default()).unwrap();
        assert!(worker.send(ServiceRequest::Login(Credentials {
            email: "driver@example.com".into(),
            password: "hunter2".into(),
        })));
        worker.send(ServiceRequest::SubmitScore(submission(500)));
        worker.send(ServiceRequest::SubmitScore(submission(900)));
        worker.send(ServiceRequest::GlobalLeaderboard { limit: 1 });

        assert!(matches!(worker.wait(), Some(ServiceResponse::LoggedIn(_))));
        assert!(matches!(worker.wait(), Some(ServiceResponse::ScoreSubmitted(_))));
        assert!(matches!(worker.wait(), Some(ServiceResponse::ScoreSubmitted(_))));
        match worker.wait() {
            Some(ServiceResponse::Leaderboard { track: None, entries }) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].score, 900);
                assert_eq!(entries[0].rank, 1);
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn bad_login_does_not_kill_the_worker() {
        let worker = spawn_service_worker(FakeService::default()).unwrap();
        worker.send(ServiceRequest::Login(Credentials {
            email: "driver@example.com".into(),
            password: "wrong".into(),
        }));
        worker.send(ServiceRequest::OnlineUsers);

        assert!(matches!(
            worker.wait(),
            Some(ServiceResponse::Failed {
                request: "login",
                status: Some(401),
                ..
            })
        ));
        assert!(matches!(worker.wait(), Some(ServiceResponse::OnlineUsers(users)) if users.len() == 1));
    }

    #[test]
    fn track_board_keeps_the_track_name() {
        let mut service = FakeService::default();
        let response = handle_request(
            &mut service,
            ServiceRequest::TrackLeaderboard {
                track: "Arena Neon".into(),
                limit: 5,
            },
        );
        assert_eq!(
            response,
            ServiceResponse::Leaderboard {
                track: Some("Arena Neon".into()),
                entries: Vec::new(),
            }
        );
    }

    #[test]
    fn drop_finishes_queued_logout() {
        let service = FakeService::default();
        let logged_out = service.logged_out.clone();
        let worker = spawn_service_worker(service).unwrap();
        worker.send(ServiceRequest::Login(Credentials {
            email: "driver@example.com".into(),
            password: "hunter2".into(),
        }));
        worker.send(ServiceRequest::Logout);
        drop(worker);
        assert!(logged_out.load(Ordering::SeqCst));
    }

    #[test]
    fn drain_is_empty_when_idle() {
        let worker = spawn_service_worker(FakeService::default()).unwrap();
        assert!(worker.drain().is_empty());
        drop(worker);
    }
}

use crate::services::types::{
    AuthSession, Credentials, LeaderboardEntry, OnlineUser, Registration, ScoreSubmission,
    SubmissionReceipt,
};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("invalid service URL {0}")]
    InvalidUrl(String),
    #[error("not logged in")]
    Unauthenticated,
}

impl ServiceError {
    /// HTTP status of a server-side rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The online score/leaderboard backend.
pub trait ScoreService: Send {
    fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, ServiceError>;
    fn register(&mut self, registration: &Registration) -> Result<AuthSession, ServiceError>;
    fn logout(&mut self) -> Result<(), ServiceError>;
    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<SubmissionReceipt, ServiceError>;
    fn global_leaderboard(&mut self, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError>;
    fn track_leaderboard(&mut self, track: &str, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError>;
    fn online_users(&mut self) -> Result<Vec<OnlineUser>, ServiceError>;
}

/// Blocking HTTP client for the score server. Keep it off the frame thread.
pub struct HttpScoreService {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpScoreService {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ServiceError> {
        let base = Url::parse(base_url).map_err(|e| ServiceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base, token })
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ServiceError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty().push("api").extend(segments);
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ServiceError> {
        let token = self.token.as_deref().ok_or(ServiceError::Unauthenticated)?;
        Ok(request.bearer_auth(token))
    }

    fn authenticate(&mut self, url: Url, body: &impl serde::Serialize) -> Result<AuthSession, ServiceError> {
        let session: AuthSession = read_json(self.client.post(url).json(body).send()?)?;
        self.token = Some(session.access_token.clone());
        Ok(session)
    }
}

fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            detail: error_detail(body),
        })
    }
}

/// The server reports failures as `{"detail": "..."}`; fall back to the raw body.
fn error_detail(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or(body)
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    Ok(check_status(response)?.json()?)
}

impl ScoreService for HttpScoreService {
    fn login(&mut self, credentials: &Credentials) -> Result<AuthSession, ServiceError> {
        let url = self.endpoint(&["auth", "login"])?;
        self.authenticate(url, credentials)
    }

    fn register(&mut self, registration: &Registration) -> Result<AuthSession, ServiceError> {
        let url = self.endpoint(&["auth", "register"])?;
        self.authenticate(url, registration)
    }

    fn logout(&mut self) -> Result<(), ServiceError> {
        let url = self.endpoint(&["auth", "logout"])?;
        let request = self.authorized(self.client.post(url))?;
        check_status(request.send()?)?;
        self.token = None;
        Ok(())
    }

    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<SubmissionReceipt, ServiceError> {
        let url = self.endpoint(&["game", "score"])?;
        let request = self.authorized(self.client.post(url).json(submission))?;
        read_json(request.send()?)
    }

    fn global_leaderboard(&mut self, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        let url = self.endpoint(&["leaderboard", "global"])?;
        read_json(self.client.get(url).query(&[("limit", limit)]).send()?)
    }

    fn track_leaderboard(&mut self, track: &str, limit: u32) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        let url = self.endpoint(&["leaderboard", "track", track])?;
        read_json(self.client.get(url).query(&[("limit", limit)]).send()?)
    }

    fn online_users(&mut self) -> Result<Vec<OnlineUser>, ServiceError> {
        let url = self.endpoint(&["users", "online"])?;
        read_json(self.client.get(url).send()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hang_off_api() {
        let service = HttpScoreService::new("http://127.0.0.1:8001", None).unwrap();
        assert_eq!(
            service.endpoint(&["leaderboard", "global"]).unwrap().as_str(),
            "http://127.0.0.1:8001/api/leaderboard/global"
        );
    }

    #[test]
    fn track_names_are_percent_encoded() {
        let service = HttpScoreService::new("http://localhost:8001/", None).unwrap();
        let url = service.endpoint(&["leaderboard", "track", "Pôr do Sol"]).unwrap();
        assert_eq!(url.path(), "/api/leaderboard/track/P%C3%B4r%20do%20Sol");
    }

    #[test]
    fn base_path_is_kept() {
        let service = HttpScoreService::new("https://example.com/drift/", None).unwrap();
        assert_eq!(
            service.endpoint(&["game", "score"]).unwrap().path(),
            "/drift/api/game/score"
        );
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            HttpScoreService::new("not a url", None),
            Err(ServiceError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpScoreService::new("mailto:someone@example.com", None),
            Err(ServiceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn error_detail_prefers_the_json_message() {
        assert_eq!(error_detail(r#"{"detail": "Invalid credentials"}"#.into()), "Invalid credentials");
        assert_eq!(error_detail("Bad Gateway".into()), "Bad Gateway");
        assert_eq!(error_detail(r#"{"detail": [1, 2]}"#.into()), r#"{"detail": [1, 2]}"#);
    }

    #[test]
    fn score_needs_a_token() {
        let mut service = HttpScoreService::new("http://127.0.0.1:9", None).unwrap();
        let submission = ScoreSubmission {
            score: 1,
            drift_time: 0,
            track_name: "Circuito Alpha".into(),
            car_used: "Mazda RX-7 FD".into(),
            color_used: "Classic Red".into(),
            game_duration: 1,
        };
        assert!(matches!(
            service.submit_score(&submission),
            Err(ServiceError::Unauthenticated)
        ));
    }
}

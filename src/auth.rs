// src/auth.rs
use crate::core::config_manager::AuthSettings;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Claims carried by the hosted auth provider's access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

/// The signed-in user for the current request. Passed explicitly to every
/// operation that reads or writes per-user data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        let expires_at = DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or_else(Utc::now);
        Self {
            user_id: claims.sub,
            email: claims.email,
            expires_at,
        }
    }
}

// ===== Session events =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Authenticated { user_id: String },
    Rejected { reason: AuthError },
}

/// Fan-out of session changes to whoever subscribed
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Sending with no subscribers is not an error
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Log every session event until the channel closes
    pub fn spawn_logger(&self) -> tokio::task::JoinHandle<()> {
        let mut receiver = self.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(SessionEvent::Authenticated { user_id }) => {
                        debug!("Session authenticated for user {}", user_id)
                    }
                    Ok(SessionEvent::Rejected { reason }) => {
                        info!("Session rejected: {}", reason.message())
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Session event logger skipped {} events", skipped)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(256)
    }
}

// ===== Token verification =====

pub struct AuthConfig {
    jwt_secret: String,
    audience: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            audience: audience.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.jwt_secret.clone(), settings.audience.clone())
    }

    pub fn verify(&self, token: &str) -> Result<Session, AuthError> {
        if self.jwt_secret.is_empty() {
            return Err(AuthError::NotConfigured);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);

        let key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::TokenVerificationFailed
        })?;

        Ok(data.claims.into())
    }

    /// Sign a token the way the auth provider does. Used by the admin CLI
    /// and tests.
    pub fn issue(&self, user_id: &str, email: Option<&str>, ttl: chrono::Duration) -> anyhow::Result<String> {
        if self.jwt_secret.is_empty() {
            anyhow::bail!("JWT secret is not configured");
        }
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            aud: self.audience.clone(),
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: Some(now.timestamp().max(0) as usize),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }
}

// ===== Request guards =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    NotConfigured,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::NotConfigured => "Authentication is not configured on this server",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "AUTH_REQUIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::TokenVerificationFailed => "TOKEN_REJECTED",
            AuthError::NotConfigured => "AUTH_NOT_CONFIGURED",
        }
    }
}

/// Why the last guard on this request failed, read back by the 401 catcher
#[derive(Debug, Default)]
pub struct AuthFailure(pub Option<AuthError>);

pub struct AuthenticatedUser {
    session: Session,
}

impl AuthenticatedUser {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }

    pub fn email(&self) -> Option<&str> {
        self.session.email.as_deref()
    }
}

fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    match header {
        Some(value) => value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidToken),
        None => Err(AuthError::MissingToken),
    }
}

fn reject<'r>(req: &'r Request<'_>, events: Option<&SessionEvents>, error: AuthError) -> Outcome<AuthenticatedUser, AuthError> {
    warn!("{} {}: {}", req.method(), req.uri(), error.message());
    req.local_cache(|| AuthFailure(Some(error)));
    if let Some(events) = events {
        events.publish(SessionEvent::Rejected { reason: error });
    }
    Outcome::Error((Status::Unauthorized, error))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => return Outcome::Error((status, AuthError::NotConfigured)),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };
        let events = req.rocket().state::<SessionEvents>();

        let token = match bearer_token(req.headers().get_one("Authorization")) {
            Ok(token) => token,
            Err(error) => return reject(req, events, error),
        };

        match auth_config.verify(token) {
            Ok(session) => {
                if let Some(events) = events {
                    events.publish(SessionEvent::Authenticated {
                        user_id: session.user_id.clone(),
                    });
                }
                Outcome::Success(AuthenticatedUser { session })
            }
            Err(error) => reject(req, events, error),
        }
    }
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = match req.headers().get_one("Authorization") {
            Some(_) => match AuthenticatedUser::from_request(req).await {
                Outcome::Success(auth) => Some(auth),
                _ => None,
            },
            None => None,
        };
        Outcome::Success(OptionalAuth { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("test-secret", "authenticated")
    }

    #[test]
    fn test_issued_token_verifies() {
        let auth = config();
        let token = auth
            .issue("user-1", Some("ada@example.com"), chrono::Duration::hours(1))
            .unwrap();
        let session = auth.verify(&token).unwrap();
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.email.as_deref(), Some("ada@example.com"));
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_wrong_secret_or_audience_is_rejected() {
        let token = config().issue("user-1", None, chrono::Duration::hours(1)).unwrap();
        let other_secret = AuthConfig::new("another-secret", "authenticated");
        assert_eq!(other_secret.verify(&token), Err(AuthError::TokenVerificationFailed));

        let other_audience = AuthConfig::new("test-secret", "service_role");
        assert_eq!(other_audience.verify(&token), Err(AuthError::TokenVerificationFailed));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = config().issue("user-1", None, chrono::Duration::hours(-2)).unwrap();
        assert_eq!(config().verify(&token), Err(AuthError::TokenVerificationFailed));
    }

    #[test]
    fn test_missing_secret() {
        let auth = AuthConfig::new("", "authenticated");
        assert_eq!(auth.verify("anything"), Err(AuthError::NotConfigured));
        assert!(auth.issue("user-1", None, chrono::Duration::hours(1)).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidToken));
        assert_eq!(bearer_token(Some("Bearer  ")), Err(AuthError::InvalidToken));
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_session_events_fan_out() {
        let events = SessionEvents::new(8);
        events.publish(SessionEvent::Authenticated { user_id: "nobody".into() });

        let mut first = events.subscribe();
        let mut second = events.subscribe();
        assert_eq!(events.subscriber_count(), 2);

        events.publish(SessionEvent::Rejected { reason: AuthError::MissingToken });
        assert_eq!(
            first.recv().await.unwrap(),
            SessionEvent::Rejected { reason: AuthError::MissingToken }
        );
        assert_eq!(
            second.recv().await.unwrap(),
            SessionEvent::Rejected { reason: AuthError::MissingToken }
        );
    }
}

//! Demo login gate.
//!
//! Fixed user directory with one shared password and random bearer tokens.
//! Resolves the user id stamped onto new campaigns; roles are never checked.

use std::time::Duration as StdDuration;

use campaign_core::config::AuthConfig;
use campaign_core::{CampaignError, CampaignResult};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::User;
use crate::seed;

/// Password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "password";

const TOKEN_PREFIX: &str = "ce_dev_";

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

pub struct AuthDirectory {
    users: Vec<User>,
    sessions: DashMap<String, Session>,
    login_delay: StdDuration,
    logout_delay: StdDuration,
    session_ttl: Duration,
}

impl AuthDirectory {
    /// Fails with `Config` unless the session TTL is a positive, representable
    /// number of hours.
    pub fn new(users: Vec<User>, cfg: &AuthConfig) -> CampaignResult<Self> {
        let session_ttl = Duration::try_hours(cfg.session_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero() && Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                CampaignError::Config(format!(
                    "auth.session_ttl_hours must be a positive number of hours, got {}",
                    cfg.session_ttl_hours
                ))
            })?;

        Ok(Self {
            users,
            sessions: DashMap::new(),
            login_delay: StdDuration::from_millis(cfg.login_ms),
            logout_delay: StdDuration::from_millis(cfg.logout_ms),
            session_ttl,
        })
    }

    pub fn with_demo_users(cfg: &AuthConfig) -> CampaignResult<Self> {
        Self::new(seed::demo_users(), cfg)
    }

    pub fn without_delay(mut self) -> Self {
        self.login_delay = StdDuration::ZERO;
        self.logout_delay = StdDuration::ZERO;
        self
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub async fn login(&self, email: &str, password: &str) -> CampaignResult<Session> {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let user = self
            .users
            .iter()
            .find(|u| u.is_active && u.email.eq_ignore_ascii_case(email.trim()));
        let user = match user {
            Some(user) if password == DEMO_PASSWORD => user.clone(),
            _ => {
                warn!(email, "Login rejected");
                return Err(CampaignError::Unauthorized("invalid email or password".into()));
            }
        };

        let expires_at = Utc::now()
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| CampaignError::Config("session expiry out of range".into()))?;
        let session = Session {
            token: generate_token(),
            user,
            expires_at,
        };
        self.sessions.insert(session.token.clone(), session.clone());
        info!(user_id = %session.user.id, role = ?session.user.role, "User logged in");
        Ok(session)
    }

    /// Returns whether a live session was dropped.
    pub async fn logout(&self, token: &str) -> bool {
        if !self.logout_delay.is_zero() {
            tokio::time::sleep(self.logout_delay).await;
        }

        let removed = self.sessions.remove(token).is_some();
        if removed {
            info!("User logged out");
        }
        removed
    }

    pub fn current_user(&self, token: &str) -> CampaignResult<User> {
        let expires_at = match self.sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => return Ok(session.user.clone()),
            Some(session) => session.expires_at,
            None => return Err(CampaignError::Unauthorized("unknown session".into())),
        };
        self.sessions.remove(token);
        Err(CampaignError::Unauthorized(format!("session expired at {expires_at}")))
    }
}

fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    format!("{}{}", TOKEN_PREFIX, hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AuthDirectory {
        AuthDirectory::with_demo_users(&AuthConfig::default()).unwrap().without_delay()
    }

    #[tokio::test]
    async fn test_login_with_demo_password() {
        let auth = directory();
        let session = auth.login("manager@adagency.com", DEMO_PASSWORD).await.unwrap();

        assert_eq!(session.user.id, "2");
        assert!(session.token.starts_with(TOKEN_PREFIX));
        assert_eq!(session.token.len(), TOKEN_PREFIX.len() + 64);
        assert!(session.expires_at > Utc::now() + Duration::hours(23));
        assert_eq!(auth.current_user(&session.token).unwrap().email, "manager@adagency.com");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = directory();
        let err = auth.login("admin@adagency.com", "hunter2").await.unwrap_err();
        assert!(matches!(err, CampaignError::Unauthorized(_)));
        assert!(auth.login("nobody@adagency.com", DEMO_PASSWORD).await.is_err());
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let auth = directory();
        let a = auth.login("admin@adagency.com", DEMO_PASSWORD).await.unwrap();
        let b = auth.login("ADMIN@adagency.com", DEMO_PASSWORD).await.unwrap();
        assert_ne!(a.token, b.token);
        assert_eq!(b.user.id, "1");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let auth = directory();
        let session = auth.login("analyst@adagency.com", DEMO_PASSWORD).await.unwrap();
        assert!(auth.logout(&session.token).await);
        assert!(!auth.logout(&session.token).await);
        assert!(auth.current_user(&session.token).is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let auth = directory();
        let session = auth.login("admin@adagency.com", DEMO_PASSWORD).await.unwrap();
        auth.sessions.alter(&session.token, |_, mut s| {
            s.expires_at = Utc::now() - Duration::seconds(1);
            s
        });

        let err = auth.current_user(&session.token).unwrap_err();
        assert!(err.to_string().contains("expired"));
        assert!(!auth.logout(&session.token).await);
    }

    #[test]
    fn test_session_ttl_out_of_range_is_config_error() {
        for hours in [0, -1, i64::MAX / 1000, i64::MAX] {
            let cfg = AuthConfig { session_ttl_hours: hours, ..AuthConfig::default() };
            let err = AuthDirectory::with_demo_users(&cfg).err();
            assert!(matches!(err, Some(CampaignError::Config(_))), "{hours}");
        }
        let cfg = AuthConfig { session_ttl_hours: 24 * 365, ..AuthConfig::default() };
        assert!(AuthDirectory::with_demo_users(&cfg).is_ok());
    }

    #[tokio::test]
    async fn test_logout_waits_configured_delay() {
        let cfg = AuthConfig { login_ms: 0, logout_ms: 30, ..AuthConfig::default() };
        let auth = AuthDirectory::with_demo_users(&cfg).unwrap();
        let session = auth.login("manager@adagency.com", DEMO_PASSWORD).await.unwrap();

        let started = std::time::Instant::now();
        assert!(auth.logout(&session.token).await);
        assert!(started.elapsed() >= StdDuration::from_millis(30));
    }

    #[test]
    fn test_find_user() {
        let auth = directory();
        assert_eq!(auth.find_user("3").map(|u| u.name.as_str()), Some("Data Analyst"));
        assert!(auth.find_user("9").is_none());
        assert_eq!(auth.users().len(), 3);
    }
}

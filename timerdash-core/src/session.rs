// File: timerdash-core/src/session.rs
//
// Explicit session context shared (via Arc) by the REST client and the
// operator prompt. The current state lives in a watch channel so the UI can
// react to a server-side teardown without polling the guard.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{error, info, warn};

use timerdash_common::models::LoginResponse;
use timerdash_common::traits::AuthApi;

use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        let expires_at = resp.expires_at();
        Self {
            token: resp.token,
            username: resp.username,
            role: resp.role,
            expires_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Active(Session),
    /// The server rejected the token. Cleared only by a new login.
    Revoked { reason: String },
}

pub struct SessionGuard {
    state: watch::Sender<SessionState>,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self { state }
    }

    /// Bearer token for the next request, if any.
    pub fn authorize(&self) -> Option<String> {
        match &*self.state.borrow() {
            SessionState::Active(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<Session> {
        match &*self.state.borrow() {
            SessionState::Active(session) => Some(session.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.borrow(), SessionState::Active(_))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn establish(&self, session: Session) {
        info!("Session established for '{}'", session.username);
        self.state.send_replace(SessionState::Active(session));
    }

    /// Server-side teardown (401). No-op unless a session is held.
    pub fn invalidate(&self, reason: &str) {
        let torn_down = self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Active(_)) {
                *state = SessionState::Revoked { reason: reason.to_string() };
                true
            } else {
                false
            }
        });
        if torn_down {
            error!("Session invalidated by server: {}", reason);
        }
    }

    pub fn clear(&self) {
        self.state.send_replace(SessionState::Anonymous);
    }

    pub async fn login<A: AuthApi + ?Sized>(
        &self,
        api: &A,
        username: &str,
        password: &str,
    ) -> Result<Session, Error> {
        let resp = api.login(username.to_string(), password.to_string()).await?;
        let session = Session::from(resp);
        self.establish(session.clone());
        Ok(session)
    }

    /// Tells the server, then drops the local session whatever it answered.
    pub async fn logout<A: AuthApi + ?Sized>(&self, api: &A) -> Result<(), Error> {
        if !self.is_authenticated() {
            return Err(Error::NotLoggedIn);
        }
        let result = api.logout().await;
        if let Err(e) = &result {
            warn!("Logout request failed, clearing local session anyway: {}", e);
        }
        self.clear();
        info!("Logged out");
        result
    }
}

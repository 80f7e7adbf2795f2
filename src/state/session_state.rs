// ============================================================================
// SESSION STATE - authentication slice
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TokenInfo;

/// Authentication slice. `authenticated == true` implies a non-empty `token`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub authenticated: bool,
    pub token: String,
    pub refresh_token: String,
    pub expiration_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SetAuthenticated(bool),
    SetToken(String),
    SetRefreshToken(String),
    SetExpirationTime(String),
    /// Whole credential set from a successful login
    LoginSucceeded(TokenInfo),
    /// New access token; the refresh token is kept unless the backend rotated it
    RefreshSucceeded(TokenInfo),
    Reset,
}

/// Session fields present in a hydration snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub authenticated: Option<bool>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub expiration_time: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&self, action: SessionAction) -> Self {
        let next = match action {
            SessionAction::SetAuthenticated(authenticated) => Self {
                authenticated,
                ..self.clone()
            },
            SessionAction::SetToken(token) => Self {
                token,
                ..self.clone()
            },
            SessionAction::SetRefreshToken(refresh_token) => Self {
                refresh_token,
                ..self.clone()
            },
            SessionAction::SetExpirationTime(expiration_time) => Self {
                expiration_time,
                ..self.clone()
            },
            SessionAction::LoginSucceeded(info) => Self {
                authenticated: true,
                token: info.token,
                refresh_token: info.refresh_token.unwrap_or_default(),
                expiration_time: info.expiration_time,
            },
            SessionAction::RefreshSucceeded(info) => Self {
                authenticated: true,
                token: info.token,
                refresh_token: info
                    .refresh_token
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| self.refresh_token.clone()),
                expiration_time: info.expiration_time,
            },
            SessionAction::Reset => Self::default(),
        };

        if next.authenticated && next.token.is_empty() {
            // Caller error (setters used out of order); not signaled
            log::warn!("⚠️ Session marked authenticated without a token");
        }
        next
    }

    /// Shallow merge of server-provided fields.
    ///
    /// Empty strings count as absent and `authenticated: false` never logs a
    /// client out: a snapshot rendered before a client-side login must not
    /// wipe the credentials acquired since. Only `Reset` ends a session.
    pub fn merge(&self, patch: SessionPatch) -> Self {
        let mut next = self.clone();

        if let Some(token) = patch.token.filter(|t| !t.is_empty()) {
            next.token = token;
        }
        if let Some(refresh_token) = patch.refresh_token.filter(|t| !t.is_empty()) {
            next.refresh_token = refresh_token;
        }
        if let Some(expiration_time) = patch.expiration_time.filter(|t| !t.is_empty()) {
            next.expiration_time = expiration_time;
        }
        if patch.authenticated == Some(true) && !next.token.is_empty() {
            next.authenticated = true;
        }

        next
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Parsed `expiration_time`: RFC 3339 instant or a bare `YYYY-MM-DD` date
    /// (midnight UTC). `None` when empty or unparseable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expiration_time.is_empty() {
            return None;
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(&self.expiration_time) {
            return Some(instant.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&self.expiration_time, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// True once `now` reaches the expiration instant. Unknown expiration is
    /// never reported as expired; the backend stays the authority.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map(|at| now >= at).unwrap_or(false)
    }
}

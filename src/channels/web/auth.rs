//! Identity resolution for the chat endpoints.
//!
//! Sessions are issued by an upstream subsystem; the gateway only resolves a
//! bearer token to the user id it trusts. When no session exists, an
//! optional `X-User-Id` header serves as a quota-only identity fallback —
//! it never authenticates the caller for action dispatch.

use std::collections::HashMap;
use std::sync::RwLock;

use axum::http::HeaderMap;

/// Header accepted as a quota-only identity source.
pub const USER_IDENTITY_HEADER: &str = "x-user-id";

/// Token → user id map standing in for the session subsystem.
#[derive(Default)]
pub struct SessionDirectory {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: &str, user_id: &str) {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.insert(token.to_string(), user_id.to_string());
    }

    pub fn resolve(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().expect("session lock poisoned");
        sessions.get(token).cloned()
    }
}

/// The identity a request carries into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    /// Authenticated user id, present only with a valid session.
    pub user_id: Option<String>,
    /// Quota-only fallback identity from the identity header.
    pub fallback: Option<String>,
}

/// Resolve the caller's identity from request headers.
pub fn resolve_identity(headers: &HeaderMap, sessions: &SessionDirectory) -> RequestIdentity {
    let user_id = bearer_token(headers).and_then(|token| sessions.resolve(token));

    let fallback = headers
        .get(USER_IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    RequestIdentity { user_id, fallback }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

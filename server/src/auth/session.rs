use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::crypto::{generate_token, hash_token};

/// Name of the cookie carrying the raw session token.
pub const SESSION_COOKIE: &str = "larder_session";

/// Identity facts established at login, returned on every lookup.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Process-held session store, keyed by the SHA-256 hash of the client
/// token; the raw token exists only in the cookie. Entries expire after
/// the configured TTL and are evicted lazily on lookup.
///
/// This is per-process state: running more than one instance requires
/// swapping in a shared store behind the same methods.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_days: i64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Creates a session for the user and returns the raw token destined
    /// for the cookie. Only the token's hash is retained.
    pub fn create(&self, user_id: i32, username: &str) -> String {
        let token = generate_token();
        let session = Session {
            user_id,
            username: username.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hash_token(&token), session);

        token
    }

    /// Looks up a live session by raw token. Expired entries are removed
    /// and treated as absent.
    pub fn get(&self, token: &str) -> Option<Session> {
        let key = hash_token(token);

        {
            let sessions = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            match sessions.get(&key) {
                Some(session) if session.expires_at > Utc::now() => {
                    return Some(session.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        None
    }

    /// Removes the session named by the raw token, if any.
    pub fn destroy(&self, token: &str) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&hash_token(token));
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Builds the login Set-Cookie value. HttpOnly keeps the token out of
/// client-side scripts.
pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    )
}

/// Builds the logout Set-Cookie value, expiring the cookie immediately.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Pulls the raw session token out of the Cookie header, if present.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

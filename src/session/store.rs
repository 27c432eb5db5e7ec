use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::plaid_api::AccessToken;

use super::SessionId;

/// Server-side session state. A session is linked once it holds an access token.
pub trait SessionStore: Send + Sync {
    fn access_token(&self, session: &SessionId) -> Option<AccessToken>;

    fn set_access_token(&self, session: &SessionId, access_token: AccessToken);

    fn is_linked(&self, session: &SessionId) -> bool {
        self.access_token(session).is_some()
    }
}

struct SessionRecord {
    access_token: Option<AccessToken>,
    last_access: Instant,
}

/// Keeps sessions in memory. Sessions that weren't accessed for `ttl` are forgotten.
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn access_token_at(&self, session: &SessionId, now: Instant) -> Option<AccessToken> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let record = sessions.get_mut(session)?;
        if now.saturating_duration_since(record.last_access) > self.ttl {
            log::debug!("Session expired");
            sessions.remove(session);
            return None;
        }
        record.last_access = now;
        record.access_token.clone()
    }

    fn set_access_token_at(&self, session: &SessionId, access_token: AccessToken, now: Instant) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, record| now.saturating_duration_since(record.last_access) <= self.ttl);
        sessions.insert(
            session.clone(),
            SessionRecord {
                access_token: Some(access_token),
                last_access: now,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn access_token(&self, session: &SessionId) -> Option<AccessToken> {
        self.access_token_at(session, Instant::now())
    }

    fn set_access_token(&self, session: &SessionId, access_token: AccessToken) {
        self.set_access_token_at(session, access_token, Instant::now())
    }
}

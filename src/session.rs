//! Per-browser-session transcripts for the web front-end

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::transcript::Transcript;

pub type SessionId = Uuid;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "session";

/// A logged-in browser session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub transcript: Transcript,
    /// Bumped by every clear; a turn only lands in the generation it started in
    pub generation: u64,
}

/// All live sessions, keyed by the id stored in the session cookie
///
/// Each session owns its transcript; concurrent users never see each other's
/// lines. Every method takes and releases the lock, so it is never held
/// across network or database calls.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user_id` with a transcript seeded from `history`
    pub async fn create(&self, user_id: Uuid, history: Vec<String>) -> SessionId {
        let id = Uuid::new_v4();
        let session = Session {
            user_id,
            transcript: Transcript::from_lines(history),
            generation: 0,
        };
        self.sessions.write().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn user_id(&self, id: SessionId) -> Option<Uuid> {
        self.sessions.read().await.get(&id).map(|s| s.user_id)
    }

    /// Append a "You:" line and return the generation the turn belongs to
    pub async fn push_user(&self, id: SessionId, text: &str) -> Option<u64> {
        self.update(id, |s| {
            s.transcript.push_user(text);
            s.generation
        })
        .await
    }

    /// Append an "AI:" line and return the resulting transcript lines
    ///
    /// Nothing is appended if the transcript was cleared since the turn's
    /// "You:" line was pushed.
    pub async fn push_ai(&self, id: SessionId, generation: u64, text: &str) -> Option<Vec<String>> {
        self.update(id, |s| {
            if s.generation != generation {
                return None;
            }
            s.transcript.push_ai(text);
            Some(s.transcript.lines().to_vec())
        })
        .await
        .flatten()
    }

    /// Empty the session's transcript and start a new generation
    pub async fn clear(&self, id: SessionId) -> bool {
        self.update(id, |s| {
            s.transcript.clear();
            s.generation += 1;
        })
        .await
        .is_some()
    }

    pub async fn generation(&self, id: SessionId) -> Option<u64> {
        self.sessions.read().await.get(&id).map(|s| s.generation)
    }

    pub async fn snapshot(&self, id: SessionId) -> Option<Vec<String>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|s| s.transcript.lines().to_vec())
    }

    pub async fn remove(&self, id: SessionId) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn update<T>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(f)
    }
}

/// Parse the session cookie value
pub fn parse_session_id(cookie: Option<&str>) -> Option<SessionId> {
    cookie.and_then(|value| Uuid::parse_str(value.trim()).ok())
}

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::csrf::{generate_token, token_matches};
use crate::models::Message;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug)]
struct Session {
    csrf_token: String,
    flash: Vec<Message>,
    last_seen: Instant,
}

/// Browser sessions keyed by the `session_id` cookie.
///
/// Sessions expire after `ttl` without use. Starting a session first drops
/// expired ones, then the least recently used while `capacity` is reached.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
    ttl: Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self { sessions: HashMap::new(), ttl, capacity: capacity.max(1) }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Whether `sid` names a live session; refreshes it when it does.
    pub fn touch(&mut self, sid: &str, now: Instant) -> bool {
        let expired = match self.sessions.get_mut(sid) {
            None => return false,
            Some(s) if now.saturating_duration_since(s.last_seen) > self.ttl => true,
            Some(s) => {
                s.last_seen = now;
                false
            }
        };
        if expired {
            self.sessions.remove(sid);
        }
        !expired
    }

    /// Starts a session with a fresh CSRF token and returns its id.
    pub fn start(&mut self, now: Instant) -> String {
        self.evict(now);
        let sid = generate_token();
        self.insert(sid.clone(), now);
        sid
    }

    /// CSRF token of `sid`, recreating the session if it was evicted meanwhile.
    pub fn csrf_token(&mut self, sid: &str, now: Instant) -> String {
        if !self.touch(sid, now) {
            self.evict(now);
            self.insert(sid.to_string(), now);
        }
        self.sessions.get(sid).map(|s| s.csrf_token.clone()).unwrap_or_default()
    }

    pub fn token_matches(&mut self, sid: &str, submitted: &str, now: Instant) -> bool {
        self.touch(sid, now) && token_matches(self.sessions.get(sid).map(|s| s.csrf_token.as_str()), submitted)
    }

    /// Queues `message` for the next page shown in `sid`; unknown sessions drop it.
    pub fn push_flash(&mut self, sid: &str, message: Message) {
        if let Some(session) = self.sessions.get_mut(sid) {
            session.flash.push(message);
        }
    }

    pub fn take_flash(&mut self, sid: &str) -> Vec<Message> {
        self.sessions.get_mut(sid).map(|s| std::mem::take(&mut s.flash)).unwrap_or_default()
    }

    fn insert(&mut self, sid: String, now: Instant) {
        self.sessions.insert(sid, Session { csrf_token: generate_token(), flash: Vec::new(), last_seen: now });
    }

    fn evict(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= ttl);
        while self.sessions.len() >= self.capacity {
            let oldest = self.sessions.iter().min_by_key(|(_, s)| s.last_seen).map(|(sid, _)| sid.clone());
            match oldest {
                Some(sid) => {
                    self.sessions.remove(&sid);
                }
                None => break,
            }
        }
    }
}

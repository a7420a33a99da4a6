// src/session/mod.rs

//! Per-viewer state. Each session cookie owns one `ViewSession` per matrix
//! screen; nothing here is shared between viewers.
//!
//! Views idle for longer than the TTL are dropped, and the store never holds
//! more than `max_views` entries (least recently used goes first).

pub mod token;
mod view;

pub use view::{Loaded, Notice, Origin, ViewSession};

use crate::errors::ServerError;
use crate::inventory::Variant;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error};

pub const SESSION_COOKIE: &str = "matrix_session";

type ViewKey = (String, Variant);

struct Slot {
    view: ViewSession,
    last_seen: Instant,
}

pub struct SessionStore {
    views: Mutex<HashMap<ViewKey, Slot>>,
    ttl: Duration,
    max_views: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_views: usize) -> Self {
        SessionStore {
            views: Mutex::new(HashMap::new()),
            ttl,
            max_views: max_views.max(1),
        }
    }

    /// Runs `f` against the caller's view, creating it on first use. The lock
    /// is held for the duration of `f`, so keep network calls outside it.
    pub fn with_view<T, F>(&self, session_id: &str, variant: Variant, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut ViewSession) -> T,
    {
        self.with_view_at(Instant::now(), session_id, variant, f)
    }

    fn with_view_at<T, F>(
        &self,
        now: Instant,
        session_id: &str,
        variant: Variant,
        f: F,
    ) -> Result<T, ServerError>
    where
        F: FnOnce(&mut ViewSession) -> T,
    {
        let mut views = self.views.lock().map_err(|_| {
            error!("session store lock poisoned");
            ServerError::InternalError
        })?;

        let key = (session_id.to_string(), variant);
        // Only a new view can grow the map, so that is when we sweep.
        if !views.contains_key(&key) {
            self.evict(&mut views, now);
        }

        let slot = views.entry(key).or_insert_with(|| {
            debug!(%variant, "new view session");
            Slot {
                view: ViewSession::new(variant),
                last_seen: now,
            }
        });
        slot.last_seen = now;

        Ok(f(&mut slot.view))
    }

    /// Drops expired views, then the least recently used ones until there is
    /// room for one more.
    fn evict(&self, views: &mut HashMap<ViewKey, Slot>, now: Instant) {
        let before = views.len();
        views.retain(|_, slot| now.saturating_duration_since(slot.last_seen) < self.ttl);

        while views.len() >= self.max_views {
            let oldest = views
                .iter()
                .min_by_key(|(_, slot)| slot.last_seen)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    views.remove(&key);
                }
                None => break,
            }
        }

        let dropped = before - views.len();
        if dropped > 0 {
            debug!(dropped, remaining = views.len(), "evicted view sessions");
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.views.lock().map(|v| v.len()).unwrap_or(0)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new(
            Duration::from_secs(crate::config::DEFAULT_SESSION_TTL_SECS),
            crate::config::DEFAULT_MAX_VIEWS,
        )
    }
}

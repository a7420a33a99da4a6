// src/app.rs
use crate::api::GridSource;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Shared by every worker thread for the life of the server.
pub struct App {
    pub config: AppConfig,
    pub source: Box<dyn GridSource>,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(config: AppConfig, source: Box<dyn GridSource>) -> Self {
        let sessions = SessionStore::new(config.session_ttl, config.max_views);
        App {
            config,
            source,
            sessions,
        }
    }
}

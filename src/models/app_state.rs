use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::i18n::Localizer;
use crate::models::SessionStore;
use crate::pages::{self, ConfigPage};
use crate::store::ConfigStore;

#[derive(Clone)]
pub struct AppState {
    /// Sessions with their CSRF tokens and pending flash messages.
    pub sessions: Arc<Mutex<SessionStore>>,
    pub store: Arc<dyn ConfigStore>,
    pub localizer: Arc<dyn Localizer>,
    /// Configuration pages in menu order.
    pub pages: Arc<Vec<Box<dyn ConfigPage>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ConfigStore>, localizer: Arc<dyn Localizer>) -> Self {
        Self::with_sessions(store, localizer, SessionStore::default())
    }

    pub fn with_session_limits(
        store: Arc<dyn ConfigStore>,
        localizer: Arc<dyn Localizer>,
        ttl: Duration,
        capacity: usize,
    ) -> Self {
        Self::with_sessions(store, localizer, SessionStore::new(ttl, capacity))
    }

    fn with_sessions(store: Arc<dyn ConfigStore>, localizer: Arc<dyn Localizer>, sessions: SessionStore) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
            store,
            localizer,
            pages: Arc::new(pages::registry()),
        }
    }

    pub fn page(&self, slug: &str) -> Option<&dyn ConfigPage> {
        self.pages.iter().find(|p| p.slug() == slug).map(|p| p.as_ref())
    }

    pub fn first_page_slug(&self) -> Option<&'static str> {
        self.pages.first().map(|p| p.slug())
    }
}

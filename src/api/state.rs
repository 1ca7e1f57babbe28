use std::sync::Arc;

use crate::cache::KvStore;
use crate::core::AppConfig;
use crate::relay::{self, AuthGateway, CalendarGateway};

pub struct AppState {
    pub auth: AuthGateway,
    pub calendar: CalendarGateway,
    // Held so the connection can be closed on shutdown
    pub cache: Arc<dyn KvStore>,
}

impl AppState {
    pub fn new(config: &AppConfig, cache: Arc<dyn KvStore>) -> Self {
        let (auth, calendar) = relay::gateways(config, Arc::clone(&cache));
        Self {
            auth,
            calendar,
            cache,
        }
    }
}

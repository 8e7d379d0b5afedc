//! Service context bundling all port trait objects.

use crate::adapters::live::{ConsoleNotifier, HttpTaskStore, HttpUserDirectory, LiveClock};
use crate::adapters::memory::{InMemoryTaskStore, StaticDirectory};
use crate::config::BoardConfig;
use crate::ports::{Clock, Notifier, TaskStore, UserDirectory};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up the live adapters or the in-memory demo set.
pub struct ServiceContext {
    /// Clock for the classification reference day.
    pub clock: Box<dyn Clock>,
    /// Remote task store.
    pub store: Box<dyn TaskStore>,
    /// User/team directory.
    pub directory: Box<dyn UserDirectory>,
    /// User-visible outcome reporting.
    pub notifier: Box<dyn Notifier>,
}

impl ServiceContext {
    /// Creates a live context against the task API at `api_url`.
    #[must_use]
    pub fn live(api_url: &str, token: Option<String>) -> Self {
        Self {
            clock: Box::new(LiveClock),
            store: Box::new(HttpTaskStore::new(api_url, token.clone())),
            directory: Box::new(HttpUserDirectory::new(api_url, token)),
            notifier: Box::new(ConsoleNotifier),
        }
    }

    /// Creates the demo context: seeded in-memory store and directory,
    /// real clock, console notifier.
    #[must_use]
    pub fn demo() -> Self {
        let clock = LiveClock;
        let today = clock.today();
        Self {
            clock: Box::new(clock),
            store: Box::new(InMemoryTaskStore::seeded(today)),
            directory: Box::new(StaticDirectory::demo()),
            notifier: Box::new(ConsoleNotifier),
        }
    }

    /// Picks live or demo mode from the configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        match &config.api_url {
            Some(url) => Self::live(url, config.api_token.clone()),
            None => Self::demo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_without_api_url_selects_demo_mode() {
        let ctx = ServiceContext::from_config(&BoardConfig::default());
        // The demo store always has the seeded fixture.
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let tasks = runtime.block_on(ctx.store.list_tasks()).unwrap();
        assert!(!tasks.is_empty());
    }
}

//! Recording adapter for the `Notifier` port.

use std::sync::Mutex;

use crate::ports::notifier::Notifier;

/// Notifier that records every event for later assertions.
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
    data_changed: Mutex<usize>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            successes: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            infos: Mutex::new(Vec::new()),
            data_changed: Mutex::new(0),
        }
    }

    /// Recorded success messages.
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("notifier lock poisoned").clone()
    }

    /// Recorded failure messages.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().expect("notifier lock poisoned").clone()
    }

    /// Recorded info messages.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().expect("notifier lock poisoned").clone()
    }

    /// How many times dependents were told to refetch.
    #[must_use]
    pub fn data_changed_count(&self) -> usize {
        *self.data_changed.lock().expect("notifier lock poisoned")
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn data_changed(&self) {
        *self.data_changed.lock().expect("notifier lock poisoned") += 1;
    }

    fn success(&self, message: &str) {
        self.successes.lock().expect("notifier lock poisoned").push(message.to_string());
    }

    fn failure(&self, message: &str) {
        self.failures.lock().expect("notifier lock poisoned").push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.lock().expect("notifier lock poisoned").push(message.to_string());
    }
}

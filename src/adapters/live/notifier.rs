//! Live adapter for the `Notifier` port, printing to the console.

use crate::ports::notifier::Notifier;

/// Notifier that prints successes and info to stdout and failures to
/// stderr. `data_changed` is silent; on the CLI there are no dependent
/// views to refresh.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn data_changed(&self) {}

    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn failure(&self, message: &str) {
        eprintln!("{message}");
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }
}

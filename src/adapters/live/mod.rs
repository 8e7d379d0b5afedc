//! Live adapters that talk to real services.

pub mod clock;
pub mod directory;
pub mod notifier;
pub mod task_store;

pub use clock::LiveClock;
pub use directory::HttpUserDirectory;
pub use notifier::ConsoleNotifier;
pub use task_store::HttpTaskStore;

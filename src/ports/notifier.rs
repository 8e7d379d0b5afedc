//! User-visible notification port.

/// Receives the user-visible outcome of engine operations.
///
/// Every mutation attempt resolves into exactly one `success` or
/// `failure` call; `data_changed` fires after committed mutations so
/// dependent views can refetch. A view that has gone away simply installs
/// a no-op implementation — in-flight mutations then complete silently.
pub trait Notifier: Send + Sync {
    /// Signals that persisted data changed and dependents should refetch.
    fn data_changed(&self);

    /// Reports a committed mutation.
    fn success(&self, message: &str);

    /// Reports a failed mutation. The message always states that the
    /// optimistic change was reverted.
    fn failure(&self, message: &str);

    /// Reports an informational condition, e.g. a manual reorder that a
    /// bucket's sort law did not honor.
    fn info(&self, message: &str);
}

/// Notifier that discards everything, for callers with no one listening.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn data_changed(&self) {}
    fn success(&self, _message: &str) {}
    fn failure(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

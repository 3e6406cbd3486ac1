//! Scoped registration table.
//!
//! Everything a mounted effect acquires from its host (event listeners,
//! pending frame requests) is pushed into one [`ListenerTable`]. Teardown is a
//! single reverse-order release, and dropping the table releases whatever is
//! still held, so an early return or a dropped handle cannot leak a listener.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

/// A host resource that must be given back exactly once.
pub trait Subscription {
    /// Label used in teardown logs.
    fn describe(&self) -> String;

    /// Give the resource back. Called at most once per subscription.
    fn release(&mut self);
}

/// Ordered set of live subscriptions.
#[derive(Default)]
pub struct ListenerTable {
    entries: Vec<Box<dyn Subscription>>,
}

impl ListenerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `subscription` until release.
    pub fn register<S: Subscription + 'static>(&mut self, subscription: S) {
        self.entries.push(Box::new(subscription));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release every subscription, newest first. Idempotent.
    pub fn release_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        while let Some(mut entry) = self.entries.pop() {
            tracing::trace!(subscription = %entry.describe(), "releasing");
            entry.release();
        }
        tracing::debug!(count, "listener table released");
    }
}

impl Drop for ListenerTable {
    fn drop(&mut self) {
        self.release_all();
    }
}

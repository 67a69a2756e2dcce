//! Listener registry for history changes.
//!
//! Listeners receive the full ordered view after every mutation. They are
//! invoked synchronously on the mutating thread, with the registry lock
//! released, so a listener may cancel its own (or another) subscription.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::clipboard::ClipboardEntry;

type Listener = Arc<dyn Fn(&[Arc<ClipboardEntry>]) + Send + Sync>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn lock_set(set: &Mutex<ListenerSet>) -> MutexGuard<'_, ListenerSet> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared handle to the set of history listeners.
#[derive(Clone, Default)]
pub struct HistoryObservers {
    inner: Arc<Mutex<ListenerSet>>,
}

impl HistoryObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered until the returned
    /// [`Subscription`] is cancelled or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Arc<ClipboardEntry>]) + Send + Sync + 'static,
    {
        let mut set = lock_set(&self.inner);
        let id = set.next_id;
        set.next_id += 1;
        set.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            set: Arc::downgrade(&self.inner),
        }
    }

    pub fn notify(&self, view: &[Arc<ClipboardEntry>]) {
        let listeners: Vec<Listener> = lock_set(&self.inner)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(view);
        }
    }

    pub fn len(&self) -> usize {
        lock_set(&self.inner).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for HistoryObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryObservers")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Cancellable registration returned by `subscribe`.
///
/// Dropping the handle unregisters the listener.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    set: Weak<Mutex<ListenerSet>>,
}

impl Subscription {
    pub fn cancel(self) {
        // Drop does the work.
    }

    fn unregister(&self) {
        if let Some(set) = self.set.upgrade() {
            lock_set(&set).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardPayload;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn view_of(texts: &[&str]) -> Vec<Arc<ClipboardEntry>> {
        texts
            .iter()
            .map(|t| Arc::new(ClipboardEntry::new(ClipboardPayload::text(*t), 0)))
            .collect()
    }

    #[test]
    fn notifies_every_listener_with_the_view() {
        let observers = HistoryObservers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_a = Arc::clone(&seen);
        let _a = observers.subscribe(move |view| {
            seen_a.fetch_add(view.len(), Ordering::SeqCst);
        });
        let seen_b = Arc::clone(&seen);
        let _b = observers.subscribe(move |view| {
            seen_b.fetch_add(view.len(), Ordering::SeqCst);
        });

        observers.notify(&view_of(&["a", "b"]));
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn cancel_unregisters_listener() {
        let observers = HistoryObservers::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let subscription = observers.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        observers.notify(&[]);
        subscription.cancel();
        observers.notify(&[]);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let observers = HistoryObservers::new();
        let subscription = observers.subscribe(|_| {});
        drop(observers);
        subscription.cancel();
    }
}

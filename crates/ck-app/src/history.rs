//! History shared between the monitor runtime and consumer handles.

use std::sync::{Arc, Mutex, MutexGuard};

use ck_core::{ClipboardEntry, HistoryObservers, HistoryStore, MaxHistorySize, Subscription};

/// Cloneable handle to the engine's [`HistoryStore`].
///
/// Every mutation is applied under a single lock acquisition, so readers
/// never see a half-applied insert or eviction. Listeners are notified after
/// the lock is released and may read the history from inside the callback.
#[derive(Debug, Clone)]
pub struct SharedHistory {
    inner: Arc<Mutex<HistoryStore>>,
    observers: HistoryObservers,
}

impl SharedHistory {
    pub fn new(max_size: MaxHistorySize) -> Self {
        Self::from_store(HistoryStore::new(max_size))
    }

    pub fn from_store(mut store: HistoryStore) -> Self {
        let observers = store.take_observers();
        Self {
            inner: Arc::new(Mutex::new(store)),
            observers,
        }
    }

    /// Run `f` with shared access to the store.
    pub fn read<R>(&self, f: impl FnOnce(&HistoryStore) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with exclusive access to the store, then notify listeners if
    /// the visible list changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut HistoryStore) -> R) -> R {
        let (result, changed) = {
            let mut store = self.lock();
            let before = store.revision();
            let result = f(&mut store);
            let changed = (store.revision() != before).then(|| store.view());
            (result, changed)
        };

        if let Some(view) = changed {
            self.observers.notify(&view);
        }
        result
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Arc<ClipboardEntry>]) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    fn lock(&self) -> MutexGuard<'_, HistoryStore> {
        // A panicking caller must not take the whole history down with it.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

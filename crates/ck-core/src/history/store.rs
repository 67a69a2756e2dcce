use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use super::{HistoryObservers, HistoryView, MaxHistorySize, Subscription};
use crate::clipboard::{CategoryFilter, ClipboardEntry};
use crate::ids::EntryId;

/// Bounded, most-recent-first clipboard history.
///
/// 有界的剪贴板历史，最新的条目在最前。
///
/// # Invariants / 不变量
/// - `len() <= max_size()` once any mutation returns.
/// - At most one entry per distinct text content (images are never deduplicated).
/// - Index 0 is the most recently inserted entry.
///
/// - 任何修改返回后 `len() <= max_size()`。
/// - 相同文本内容最多保留一条（图片不去重）。
/// - 索引 0 是最近插入的条目。
///
/// Entries leave the store only through tail eviction, dedup replacement or
/// [`HistoryStore::remove_all`].
///
/// # Behavior / 行为
/// - Every mutation that changes the visible list bumps
///   [`HistoryStore::revision`] and notifies the store's own listeners.
/// - A store shared behind a lock hands its listeners to the owner with
///   [`HistoryStore::take_observers`], which notifies them after unlocking.
///
/// - 每次改变可见列表的修改都会递增 `revision` 并通知监听器。
/// - 放在锁后面共享的 store 应通过 `take_observers` 把监听器交给持有者，
///   由持有者在释放锁之后再通知。
#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<Arc<ClipboardEntry>>,
    max_size: MaxHistorySize,
    observers: HistoryObservers,
    revision: u64,
}

impl HistoryStore {
    pub fn new(max_size: MaxHistorySize) -> Self {
        Self::with_observers(max_size, HistoryObservers::new())
    }

    pub fn with_observers(max_size: MaxHistorySize, observers: HistoryObservers) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size.get()),
            max_size,
            observers,
            revision: 0,
        }
    }

    /// Insert `entry` at the front.
    ///
    /// An older entry with byte-equal text is removed first, wherever it
    /// sits, so the new occurrence takes the front position. Overflow is
    /// evicted from the tail.
    pub fn insert(&mut self, entry: ClipboardEntry) -> Arc<ClipboardEntry> {
        let entry = Arc::new(entry);

        if let Some(text) = entry.text_content() {
            if let Some(index) = self
                .entries
                .iter()
                .position(|existing| existing.text_content() == Some(text))
            {
                if let Some(replaced) = self.entries.remove(index) {
                    debug!(
                        replaced_id = %replaced.id(),
                        from_index = index,
                        "Replaced duplicate history entry"
                    );
                }
            }
        }

        self.entries.push_front(Arc::clone(&entry));
        self.evict_overflow();
        self.notify();

        entry
    }

    pub fn remove_all(&mut self) {
        self.entries.clear();
        self.notify();
    }

    /// Bounds-checked lookup; `None` when `index` is out of range.
    pub fn get(&self, index: usize) -> Option<&Arc<ClipboardEntry>> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &EntryId) -> Option<&Arc<ClipboardEntry>> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn first(&self) -> Option<&Arc<ClipboardEntry>> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> MaxHistorySize {
        self.max_size
    }

    /// Change the capacity. Lowering it evicts from the tail immediately.
    pub fn set_max_size(&mut self, max_size: MaxHistorySize) {
        self.max_size = max_size;
        if self.evict_overflow() > 0 {
            self.notify();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClipboardEntry>> {
        self.entries.iter()
    }

    pub fn view(&self) -> HistoryView {
        self.entries.iter().cloned().collect()
    }

    pub fn filtered(&self, filter: CategoryFilter) -> HistoryView {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry.category()))
            .cloned()
            .collect()
    }

    /// The `limit` most recent entries.
    pub fn recent(&self, limit: usize) -> HistoryView {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Arc<ClipboardEntry>]) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn observers(&self) -> &HistoryObservers {
        &self.observers
    }

    /// Detach the listener set, leaving the store with none of its own.
    pub fn take_observers(&mut self) -> HistoryObservers {
        std::mem::take(&mut self.observers)
    }

    /// Counter bumped by every mutation that notifies listeners.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.max_size.get() {
            if let Some(entry) = self.entries.pop_back() {
                debug!(entry_id = %entry.id(), "Evicted history entry");
                evicted += 1;
            }
        }
        evicted
    }

    fn notify(&mut self) {
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        self.observers.notify(&view);
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(MaxHistorySize::default())
    }
}

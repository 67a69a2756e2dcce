use std::sync::Arc;

use ck_core::{
    CategoryFilter, ClipboardEntry, EntryId, HistoryView, MaxHistorySize, Subscription,
};
use tokio::sync::oneshot;

use super::EngineError;
use crate::history::SharedHistory;
use crate::runtime::{MonitorCommand, MonitorCommandSender};

/// Consumer-facing handle to a running clipboard engine.
///
/// Cheap to clone. Reads go straight to the shared history; anything that
/// changes monitor or history state is sent to the runtime task and the
/// call returns once it has been applied.
#[derive(Debug, Clone)]
pub struct ClipboardEngineHandle {
    command_tx: MonitorCommandSender,
    history: SharedHistory,
    display_limit: usize,
}

impl ClipboardEngineHandle {
    pub(crate) fn new(
        command_tx: MonitorCommandSender,
        history: SharedHistory,
        display_limit: usize,
    ) -> Self {
        Self {
            command_tx,
            history,
            display_limit,
        }
    }

    /// Snapshot of the history, newest first.
    pub fn history(&self) -> HistoryView {
        self.history.read(|store| store.view())
    }

    pub fn get(&self, index: usize) -> Option<Arc<ClipboardEntry>> {
        self.history.read(|store| store.get(index).cloned())
    }

    pub fn find(&self, id: &EntryId) -> Option<Arc<ClipboardEntry>> {
        self.history.read(|store| store.find(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.history.read(|store| store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn filtered(&self, filter: CategoryFilter) -> HistoryView {
        self.history.read(|store| store.filtered(filter))
    }

    pub fn recent(&self, limit: usize) -> HistoryView {
        self.history.read(|store| store.recent(limit))
    }

    /// The newest entries up to the configured display limit.
    pub fn display_view(&self) -> HistoryView {
        self.recent(self.display_limit)
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    pub fn max_size(&self) -> MaxHistorySize {
        self.history.read(|store| store.max_size())
    }

    /// Register a history listener.
    ///
    /// Listeners run on the monitor runtime after the history lock has been
    /// released, so the read methods of this handle are safe to call from
    /// inside one.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Arc<ClipboardEntry>]) + Send + Sync + 'static,
    {
        self.history.subscribe(listener)
    }

    pub async fn start(&self) -> Result<(), EngineError> {
        self.request(|reply| MonitorCommand::Start { reply }).await
    }

    pub async fn stop(&self) -> Result<(), EngineError> {
        self.request(|reply| MonitorCommand::Stop { reply }).await
    }

    /// Put `entry` back on the system clipboard.
    ///
    /// The history is left as it is; the write is not captured as a new
    /// entry.
    pub async fn select_for_restore(&self, entry: Arc<ClipboardEntry>) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(MonitorCommand::Restore { entry, reply }).await?;
        rx.await.map_err(|_| EngineError::RuntimeClosed)?
    }

    pub async fn restore_by_id(&self, id: &EntryId) -> Result<(), EngineError> {
        let entry = self
            .find(id)
            .ok_or_else(|| EngineError::EntryNotFound(id.clone()))?;
        self.select_for_restore(entry).await
    }

    pub async fn clear_history(&self) -> Result<(), EngineError> {
        self.request(|reply| MonitorCommand::ClearHistory { reply })
            .await
    }

    pub async fn set_max_size(&self, max_size: usize) -> Result<(), EngineError> {
        let max_size = MaxHistorySize::new(max_size)?;
        self.request(|reply| MonitorCommand::SetMaxSize { max_size, reply })
            .await
    }

    /// Ask the runtime to exit. A capture already running is allowed to
    /// finish first.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.send(MonitorCommand::Shutdown).await
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<()>) -> MonitorCommand,
    ) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply)).await?;
        rx.await.map_err(|_| EngineError::RuntimeClosed)
    }

    async fn send(&self, command: MonitorCommand) -> Result<(), EngineError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| EngineError::RuntimeClosed)
    }
}

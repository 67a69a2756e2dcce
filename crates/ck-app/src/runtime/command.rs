use std::sync::Arc;

use ck_core::{ClipboardEntry, MaxHistorySize};
use tokio::sync::{mpsc, oneshot};

use crate::engine::EngineError;

pub type MonitorCommandSender = mpsc::Sender<MonitorCommand>;
pub type MonitorCommandReceiver = mpsc::Receiver<MonitorCommand>;

pub(crate) const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Requests handled on the monitor runtime task.
///
/// Every variant except [`Shutdown`](Self::Shutdown) carries a reply
/// channel that fires once the request has been applied.
#[derive(Debug)]
pub enum MonitorCommand {
    Start {
        reply: oneshot::Sender<()>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Restore {
        entry: Arc<ClipboardEntry>,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    ClearHistory {
        reply: oneshot::Sender<()>,
    },
    SetMaxSize {
        max_size: MaxHistorySize,
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

pub fn command_channel() -> (MonitorCommandSender, MonitorCommandReceiver) {
    mpsc::channel(COMMAND_CHANNEL_CAPACITY)
}

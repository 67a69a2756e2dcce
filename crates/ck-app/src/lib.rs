//! # ck-app
//!
//! Orchestration layer of the clipboard history engine: the change monitor
//! state machine, the tokio runtime that drives it, and the handle
//! consumers use to read history and restore entries.

pub mod engine;
pub mod history;
pub mod monitor;
pub mod runtime;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use engine::{ClipboardEngine, ClipboardEngineHandle, EngineError};
pub use history::SharedHistory;
pub use monitor::{ChangeMonitor, MonitorPhase, PollOutcome};

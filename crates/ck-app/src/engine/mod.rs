//! Engine assembly and the consumer handle.

mod error;
mod handle;

pub use error::EngineError;
pub use handle::ClipboardEngineHandle;

use std::sync::Arc;

use ck_core::{ClipboardPort, ClockPort, EngineConfig};
use tokio::task::JoinHandle;
use tracing::info;

use crate::history::SharedHistory;
use crate::monitor::ChangeMonitor;
use crate::runtime::{command_channel, MonitorRuntime};

/// A configured engine that has not been spawned yet.
///
/// The monitor starts out stopped; call
/// [`ClipboardEngineHandle::start`] once the runtime is running.
#[derive(Debug)]
pub struct ClipboardEngine {
    handle: ClipboardEngineHandle,
    runtime: MonitorRuntime,
}

impl ClipboardEngine {
    pub fn new(
        config: EngineConfig,
        clipboard: Arc<dyn ClipboardPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let history = SharedHistory::new(config.max_size);
        let monitor = ChangeMonitor::new(
            clipboard,
            clock,
            history.clone(),
            config.capture_on_start,
        );
        let (command_tx, command_rx) = command_channel();
        let runtime = MonitorRuntime::new(
            monitor,
            command_rx,
            config.poll_interval,
            config.settle_delay,
        );
        let handle = ClipboardEngineHandle::new(command_tx, history, config.display_limit);

        info!(
            max_size = %config.max_size,
            display_limit = config.display_limit,
            "Clipboard engine created"
        );
        Ok(Self { handle, runtime })
    }

    pub fn handle(&self) -> ClipboardEngineHandle {
        self.handle.clone()
    }

    /// Split into the handle and the runtime, for callers that drive the
    /// runtime future themselves.
    pub fn into_parts(self) -> (ClipboardEngineHandle, MonitorRuntime) {
        (self.handle, self.runtime)
    }

    /// Spawn the runtime on the current tokio runtime.
    pub fn spawn(self) -> (ClipboardEngineHandle, JoinHandle<()>) {
        let (handle, runtime) = self.into_parts();
        let join = tokio::spawn(runtime.run());
        (handle, join)
    }
}

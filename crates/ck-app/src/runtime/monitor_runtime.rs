use std::future;
use std::time::Duration;

use anyhow::anyhow;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::command::{MonitorCommand, MonitorCommandReceiver};
use crate::engine::EngineError;
use crate::monitor::{CaptureResult, ChangeMonitor, PollOutcome, StartOutcome};

/// Drives a [`ChangeMonitor`] on a tokio task.
///
/// Ticks, settle deadlines, capture completions and commands are all
/// handled on this one task, so the monitor state is never touched
/// concurrently. Clipboard reads run on the blocking pool.
pub struct MonitorRuntime {
    monitor: ChangeMonitor,
    command_rx: MonitorCommandReceiver,
    poll_interval: Duration,
    settle_delay: Duration,
    settle_deadline: Option<Instant>,
    capture: Option<JoinHandle<CaptureResult>>,
    shutting_down: bool,
}

impl MonitorRuntime {
    pub fn new(
        monitor: ChangeMonitor,
        command_rx: MonitorCommandReceiver,
        poll_interval: Duration,
        settle_delay: Duration,
    ) -> Self {
        Self {
            monitor,
            command_rx,
            poll_interval,
            settle_delay,
            settle_deadline: None,
            capture: None,
            shutting_down: false,
        }
    }

    pub async fn run(mut self) {
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            settle_delay_ms = self.settle_delay.as_millis() as u64,
            "Clipboard monitor runtime started"
        );

        while !self.shutting_down {
            let polling = self.monitor.is_polling();
            let settle_deadline = self.settle_deadline;

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        debug!("All engine handles dropped");
                        self.shutting_down = true;
                    }
                },
                result = join_capture(&mut self.capture) => {
                    self.capture = None;
                    self.monitor.complete_capture(result);
                }
                _ = wait_until(settle_deadline) => {
                    self.settle_deadline = None;
                    self.monitor.finish_restore();
                }
                _ = ticker.tick(), if polling => self.on_tick(),
            }
        }

        if self.capture.is_some() {
            let result = join_capture(&mut self.capture).await;
            self.capture = None;
            self.monitor.complete_capture(result);
        }
        info!("Clipboard monitor runtime stopped");
    }

    fn on_tick(&mut self) {
        if let PollOutcome::Changed(_) = self.monitor.poll() {
            self.spawn_capture();
        }
    }

    fn spawn_capture(&mut self) {
        let job = self.monitor.capture_job();
        self.capture = Some(tokio::task::spawn_blocking(move || job.run()));
    }

    fn handle_command(&mut self, command: MonitorCommand) {
        match command {
            MonitorCommand::Start { reply } => {
                if self.monitor.start() == StartOutcome::StartedWithCapture {
                    self.spawn_capture();
                }
                let _ = reply.send(());
            }
            MonitorCommand::Stop { reply } => {
                self.monitor.stop();
                let _ = reply.send(());
            }
            MonitorCommand::Restore { entry, reply } => {
                let result = self
                    .monitor
                    .begin_restore(&entry)
                    .map_err(|err| EngineError::ClipboardWrite(err.to_string()));
                // A second restore inside the window pushes the deadline out.
                self.settle_deadline = Some(Instant::now() + self.settle_delay);
                let _ = reply.send(result);
            }
            MonitorCommand::ClearHistory { reply } => {
                self.monitor.history().update(|store| store.remove_all());
                info!("Clipboard history cleared");
                let _ = reply.send(());
            }
            MonitorCommand::SetMaxSize { max_size, reply } => {
                self.monitor
                    .history()
                    .update(|store| store.set_max_size(max_size));
                info!(%max_size, "History size limit changed");
                let _ = reply.send(());
            }
            MonitorCommand::Shutdown => {
                info!("Clipboard monitor runtime shutting down");
                self.shutting_down = true;
            }
        }
    }
}

async fn join_capture(capture: &mut Option<JoinHandle<CaptureResult>>) -> CaptureResult {
    match capture.as_mut() {
        Some(handle) => match handle.await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "Clipboard capture task failed");
                Err(anyhow!("capture task failed: {err}"))
            }
        },
        None => future::pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

impl std::fmt::Debug for MonitorRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorRuntime")
            .field("monitor", &self.monitor)
            .field("settle_deadline", &self.settle_deadline)
            .field("capture_running", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

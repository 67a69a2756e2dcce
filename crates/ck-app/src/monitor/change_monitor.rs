use std::sync::Arc;

use anyhow::Result;
use ck_core::{ChangeToken, ClipboardEntry, ClipboardPayload, ClipboardPort, ClockPort};
use tracing::{debug, info, warn};

use super::capture::{CaptureJob, CaptureResult};
use crate::history::SharedHistory;

/// Consecutive read failures are logged on the first one and then once per
/// this many.
const READ_FAILURE_LOG_EVERY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Stopped,
    Polling,
    /// A programmatic write is settling; polling is paused.
    SuppressedForWrite,
}

/// What a single poll decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The monitor is stopped or suppressed; the clipboard was not inspected.
    Suspended,
    Unchanged,
    /// The clipboard changed but a capture is still running. The change is
    /// picked up on a later poll.
    CaptureBusy,
    /// The clipboard changed and the caller must now run a capture.
    Changed(ChangeToken),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    AlreadyRunning,
    Started,
    /// Started for the first time with `capture_on_start`; the caller must
    /// run a capture.
    StartedWithCapture,
}

#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Inserted(Arc<ClipboardEntry>),
    NoContent,
    ReadFailed,
    /// The capture overlapped a restore and read back the restored payload.
    Discarded,
}

/// Polling state machine deciding when the clipboard is read and when a
/// change is ours rather than the user's.
///
/// The monitor itself never sleeps or spawns. A driver calls
/// [`poll`](Self::poll) on every tick, runs the returned capture wherever
/// it likes, and hands the result back through
/// [`complete_capture`](Self::complete_capture).
pub struct ChangeMonitor {
    clipboard: Arc<dyn ClipboardPort>,
    clock: Arc<dyn ClockPort>,
    history: SharedHistory,
    phase: MonitorPhase,
    last_change_token: ChangeToken,
    capture_in_progress: bool,
    /// Payload written while a capture was in flight.
    overlapping_write: Option<ClipboardPayload>,
    resume_after_write: bool,
    capture_on_start: bool,
    started_once: bool,
    read_failures: u32,
}

impl ChangeMonitor {
    pub fn new(
        clipboard: Arc<dyn ClipboardPort>,
        clock: Arc<dyn ClockPort>,
        history: SharedHistory,
        capture_on_start: bool,
    ) -> Self {
        let last_change_token = clipboard.change_token();
        Self {
            clipboard,
            clock,
            history,
            phase: MonitorPhase::Stopped,
            last_change_token,
            capture_in_progress: false,
            overlapping_write: None,
            resume_after_write: false,
            capture_on_start,
            started_once: false,
            read_failures: 0,
        }
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    pub fn is_polling(&self) -> bool {
        self.phase == MonitorPhase::Polling
    }

    pub fn last_change_token(&self) -> ChangeToken {
        self.last_change_token
    }

    pub fn capture_in_progress(&self) -> bool {
        self.capture_in_progress
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn start(&mut self) -> StartOutcome {
        match self.phase {
            MonitorPhase::Polling => return StartOutcome::AlreadyRunning,
            MonitorPhase::SuppressedForWrite => {
                // Polling resumes once the pending write has settled.
                if !std::mem::replace(&mut self.resume_after_write, true) {
                    // Restored while stopped; copies made since then are not history.
                    self.last_change_token = self.clipboard.change_token();
                    info!(token = %self.last_change_token, "Clipboard monitor started");
                }
                return StartOutcome::Started;
            }
            MonitorPhase::Stopped => {}
        }

        self.phase = MonitorPhase::Polling;
        // Changes made while stopped are not history.
        self.last_change_token = self.clipboard.change_token();
        info!(token = %self.last_change_token, "Clipboard monitor started");

        let first_start = !self.started_once;
        self.started_once = true;
        if first_start && self.capture_on_start && !self.capture_in_progress {
            self.capture_in_progress = true;
            return StartOutcome::StartedWithCapture;
        }
        StartOutcome::Started
    }

    /// Stop polling. A capture already in flight still completes.
    pub fn stop(&mut self) -> bool {
        self.resume_after_write = false;
        if self.phase == MonitorPhase::Stopped {
            return false;
        }
        self.phase = MonitorPhase::Stopped;
        info!("Clipboard monitor stopped");
        true
    }

    pub fn poll(&mut self) -> PollOutcome {
        if self.phase != MonitorPhase::Polling {
            return PollOutcome::Suspended;
        }

        let token = self.clipboard.change_token();
        if token == self.last_change_token {
            return PollOutcome::Unchanged;
        }
        if self.capture_in_progress {
            // Leave the token alone so the next poll sees the change again.
            debug!(%token, "Capture in progress, deferring clipboard change");
            return PollOutcome::CaptureBusy;
        }

        debug!(previous = %self.last_change_token, current = %token, "Clipboard changed");
        self.last_change_token = token;
        self.capture_in_progress = true;
        PollOutcome::Changed(token)
    }

    /// Build the read for a capture that [`poll`](Self::poll) or
    /// [`start`](Self::start) asked for.
    pub fn capture_job(&self) -> CaptureJob {
        CaptureJob::new(Arc::clone(&self.clipboard), Arc::clone(&self.clock))
    }

    pub fn complete_capture(&mut self, result: CaptureResult) -> CaptureOutcome {
        self.capture_in_progress = false;
        let overlapping_write = self.overlapping_write.take();

        match result {
            Ok(Some(entry)) if overlapping_write.as_ref() == Some(entry.payload()) => {
                debug!(id = %entry.id(), "Dropped capture of a restored entry");
                CaptureOutcome::Discarded
            }
            Ok(Some(entry)) => {
                self.read_failures = 0;
                let entry = self.history.update(|store| store.insert(entry));
                debug!(
                    id = %entry.id(),
                    category = %entry.category(),
                    "Captured clipboard entry"
                );
                CaptureOutcome::Inserted(entry)
            }
            Ok(None) => {
                self.read_failures = 0;
                debug!("Clipboard holds no supported content");
                CaptureOutcome::NoContent
            }
            Err(err) => {
                self.read_failures = self.read_failures.saturating_add(1);
                if self.read_failures == 1 || self.read_failures % READ_FAILURE_LOG_EVERY == 0 {
                    warn!(
                        error = %err,
                        consecutive_failures = self.read_failures,
                        "Failed to read clipboard"
                    );
                }
                CaptureOutcome::ReadFailed
            }
        }
    }

    /// Poll and, on a change, capture on the calling thread.
    ///
    /// Returns `None` when no capture ran.
    pub fn tick(&mut self) -> Option<CaptureOutcome> {
        match self.poll() {
            PollOutcome::Changed(_) => {
                let result = self.capture_job().run();
                Some(self.complete_capture(result))
            }
            _ => None,
        }
    }

    /// Put `entry` back on the clipboard without recording it again.
    ///
    /// Polling is suspended until [`finish_restore`](Self::finish_restore)
    /// is called. The remembered token is moved past the write whether or
    /// not the write succeeded, so a partial write is not captured either.
    pub fn begin_restore(&mut self, entry: &ClipboardEntry) -> Result<()> {
        self.resume_after_write = match self.phase {
            MonitorPhase::Polling => true,
            MonitorPhase::SuppressedForWrite => self.resume_after_write,
            MonitorPhase::Stopped => false,
        };
        self.phase = MonitorPhase::SuppressedForWrite;
        if self.capture_in_progress {
            self.overlapping_write = Some(entry.payload().clone());
        }

        let result = self
            .clipboard
            .clear()
            .and_then(|()| self.clipboard.write_snapshot(entry.payload()));
        self.last_change_token = self.clipboard.change_token();

        match &result {
            Ok(()) => debug!(
                id = %entry.id(),
                token = %self.last_change_token,
                "Restored clipboard entry"
            ),
            Err(err) => warn!(id = %entry.id(), error = %err, "Failed to restore clipboard entry"),
        }
        result
    }

    /// End the settle window opened by [`begin_restore`](Self::begin_restore).
    ///
    /// Polling resumes only if it was running before the write and was not
    /// stopped in the meantime.
    pub fn finish_restore(&mut self) {
        if self.phase != MonitorPhase::SuppressedForWrite {
            return;
        }
        self.phase = if std::mem::take(&mut self.resume_after_write) {
            MonitorPhase::Polling
        } else {
            MonitorPhase::Stopped
        };
        debug!(phase = ?self.phase, "Clipboard write settled");
    }
}

impl std::fmt::Debug for ChangeMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMonitor")
            .field("phase", &self.phase)
            .field("last_change_token", &self.last_change_token)
            .field("capture_in_progress", &self.capture_in_progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClipboard, ManualClock};
    use ck_core::{ClipboardPayload, MaxHistorySize};

    struct Fixture {
        clipboard: Arc<FakeClipboard>,
        monitor: ChangeMonitor,
    }

    impl Fixture {
        fn new(capture_on_start: bool) -> Self {
            let clipboard = Arc::new(FakeClipboard::new());
            let monitor = ChangeMonitor::new(
                clipboard.clone(),
                Arc::new(ManualClock::new(0)),
                SharedHistory::new(MaxHistorySize::new(10).unwrap()),
                capture_on_start,
            );
            Self { clipboard, monitor }
        }

        fn previews(&self) -> Vec<String> {
            self.monitor.history().read(|store| {
                store
                    .iter()
                    .map(|entry| entry.preview_text().to_string())
                    .collect()
            })
        }
    }

    #[test]
    fn stopped_monitor_never_inspects_the_clipboard() {
        let mut fx = Fixture::new(false);
        fx.clipboard.copy_external(ClipboardPayload::text("ignored"));

        assert_eq!(fx.monitor.poll(), PollOutcome::Suspended);
        assert_eq!(fx.clipboard.reads(), 0);
    }

    #[test]
    fn start_resets_the_token_and_is_idempotent() {
        let mut fx = Fixture::new(false);
        fx.clipboard.copy_external(ClipboardPayload::text("before start"));

        assert_eq!(fx.monitor.start(), StartOutcome::Started);
        assert_eq!(fx.monitor.start(), StartOutcome::AlreadyRunning);
        assert_eq!(fx.monitor.poll(), PollOutcome::Unchanged);
        assert!(fx.previews().is_empty());
    }

    #[test]
    fn first_start_can_capture_current_content() {
        let mut fx = Fixture::new(true);
        fx.clipboard.copy_external(ClipboardPayload::text("already there"));

        assert_eq!(fx.monitor.start(), StartOutcome::StartedWithCapture);
        assert!(fx.monitor.capture_in_progress());
        let job = fx.monitor.capture_job();
        fx.monitor.complete_capture(job.run());
        assert_eq!(fx.previews(), vec!["already there"]);

        fx.monitor.stop();
        assert_eq!(fx.monitor.start(), StartOutcome::Started);
    }

    #[test]
    fn change_is_captured_once() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        fx.clipboard.copy_external(ClipboardPayload::text("hello"));

        assert!(matches!(fx.monitor.tick(), Some(CaptureOutcome::Inserted(_))));
        assert!(fx.monitor.tick().is_none());
        assert_eq!(fx.previews(), vec!["hello"]);
        assert_eq!(fx.monitor.last_change_token(), fx.clipboard.token());
    }

    #[test]
    fn polls_during_a_capture_are_dropped_without_losing_the_change() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        fx.clipboard.copy_external(ClipboardPayload::text("first"));

        let PollOutcome::Changed(first) = fx.monitor.poll() else {
            panic!("expected a change");
        };
        let job = fx.monitor.capture_job();

        fx.clipboard.copy_external(ClipboardPayload::text("second"));
        assert_eq!(fx.monitor.poll(), PollOutcome::CaptureBusy);
        assert_eq!(fx.monitor.poll(), PollOutcome::CaptureBusy);
        assert_eq!(fx.monitor.last_change_token(), first);

        // The read happens after the second copy, so it sees "second".
        fx.monitor.complete_capture(job.run());
        assert!(matches!(fx.monitor.poll(), PollOutcome::Changed(_)));
        let job = fx.monitor.capture_job();
        fx.monitor.complete_capture(job.run());

        assert_eq!(fx.previews(), vec!["second"]);
    }

    #[test]
    fn capture_finishing_after_stop_is_still_recorded() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        fx.clipboard.copy_external(ClipboardPayload::text("late"));
        assert!(matches!(fx.monitor.poll(), PollOutcome::Changed(_)));
        let job = fx.monitor.capture_job();

        fx.monitor.stop();
        fx.monitor.complete_capture(job.run());

        assert_eq!(fx.previews(), vec!["late"]);
        assert!(!fx.monitor.capture_in_progress());
    }

    #[test]
    fn read_failures_count_as_no_content() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        fx.clipboard.fail_reads(true);

        for _ in 0..12 {
            fx.clipboard.copy_external(ClipboardPayload::text("x"));
            assert!(matches!(fx.monitor.tick(), Some(CaptureOutcome::ReadFailed)));
        }
        assert!(fx.previews().is_empty());

        fx.clipboard.fail_reads(false);
        fx.clipboard.copy_external(ClipboardPayload::text("recovered"));
        assert!(matches!(fx.monitor.tick(), Some(CaptureOutcome::Inserted(_))));
    }

    #[test]
    fn restore_is_not_recaptured() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        for text in ["A", "B", "C"] {
            fx.clipboard.copy_external(ClipboardPayload::text(text));
            fx.monitor.tick();
        }
        let a = fx
            .monitor
            .history()
            .read(|store| store.get(2).cloned())
            .unwrap();

        fx.monitor.begin_restore(&a).unwrap();
        assert_eq!(fx.monitor.phase(), MonitorPhase::SuppressedForWrite);
        assert!(fx.monitor.tick().is_none());

        fx.monitor.finish_restore();
        assert!(fx.monitor.is_polling());
        assert!(fx.monitor.tick().is_none());

        assert_eq!(fx.previews(), vec!["C", "B", "A"]);
        assert_eq!(fx.clipboard.content(), Some(ClipboardPayload::text("A")));
        assert_eq!(fx.clipboard.clears(), 1);
    }

    #[test]
    fn capture_overlapping_a_restore_does_not_reorder_history() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        for text in ["A", "B"] {
            fx.clipboard.copy_external(ClipboardPayload::text(text));
            fx.monitor.tick();
        }
        let a = fx
            .monitor
            .history()
            .read(|store| store.get(1).cloned())
            .unwrap();

        fx.clipboard.copy_external(ClipboardPayload::text("B"));
        assert!(matches!(fx.monitor.poll(), PollOutcome::Changed(_)));
        let job = fx.monitor.capture_job();

        fx.monitor.begin_restore(&a).unwrap();
        // The read lands after the write and sees the restored payload.
        let outcome = fx.monitor.complete_capture(job.run());

        assert!(matches!(outcome, CaptureOutcome::Discarded));
        assert_eq!(fx.previews(), vec!["B", "A"]);
    }

    #[test]
    fn stop_during_settle_keeps_the_monitor_stopped() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        let entry = ClipboardEntry::new(ClipboardPayload::text("restored"), 0);

        fx.monitor.begin_restore(&entry).unwrap();
        assert!(fx.monitor.stop());
        fx.monitor.finish_restore();

        assert_eq!(fx.monitor.phase(), MonitorPhase::Stopped);
    }

    #[test]
    fn restore_while_stopped_writes_but_stays_stopped() {
        let mut fx = Fixture::new(false);
        let entry = ClipboardEntry::new(ClipboardPayload::text("quiet"), 0);

        fx.monitor.begin_restore(&entry).unwrap();
        fx.monitor.finish_restore();

        assert_eq!(fx.monitor.phase(), MonitorPhase::Stopped);
        assert_eq!(fx.clipboard.writes().len(), 1);
    }

    #[test]
    fn start_during_settle_resumes_after_it() {
        let mut fx = Fixture::new(false);
        let entry = ClipboardEntry::new(ClipboardPayload::text("quiet"), 0);

        fx.monitor.begin_restore(&entry).unwrap();
        assert_eq!(fx.monitor.start(), StartOutcome::Started);
        assert_eq!(fx.monitor.phase(), MonitorPhase::SuppressedForWrite);

        fx.monitor.finish_restore();
        assert!(fx.monitor.is_polling());
    }

    #[test]
    fn copies_before_a_start_during_settle_are_not_captured() {
        let mut fx = Fixture::new(false);
        let entry = ClipboardEntry::new(ClipboardPayload::text("quiet"), 0);

        fx.monitor.begin_restore(&entry).unwrap();
        fx.clipboard.copy_external(ClipboardPayload::text("while stopped"));
        fx.monitor.start();
        fx.monitor.finish_restore();

        assert!(fx.monitor.tick().is_none());
        assert!(fx.previews().is_empty());

        fx.clipboard.copy_external(ClipboardPayload::text("after start"));
        assert!(matches!(fx.monitor.tick(), Some(CaptureOutcome::Inserted(_))));
        assert_eq!(fx.previews(), vec!["after start"]);
    }

    #[test]
    fn copies_after_a_start_during_settle_are_captured() {
        let mut fx = Fixture::new(false);
        let entry = ClipboardEntry::new(ClipboardPayload::text("quiet"), 0);

        fx.monitor.begin_restore(&entry).unwrap();
        fx.monitor.start();
        fx.clipboard.copy_external(ClipboardPayload::text("during settle"));
        fx.monitor.finish_restore();

        assert!(matches!(fx.monitor.tick(), Some(CaptureOutcome::Inserted(_))));
        assert_eq!(fx.previews(), vec!["during settle"]);
    }

    #[test]
    fn failed_write_still_moves_the_token_and_resumes() {
        let mut fx = Fixture::new(false);
        fx.monitor.start();
        fx.clipboard.fail_writes(true);
        let entry = ClipboardEntry::new(ClipboardPayload::text("rejected"), 0);

        assert!(fx.monitor.begin_restore(&entry).is_err());
        // The clear went through and bumped the token.
        assert_eq!(fx.monitor.last_change_token(), fx.clipboard.token());

        fx.monitor.finish_restore();
        assert!(fx.monitor.is_polling());
        assert!(fx.monitor.tick().is_none());
    }
}

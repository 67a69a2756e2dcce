use std::sync::Arc;

use anyhow::Result;
use ck_core::{ClipboardEntry, ClipboardPort, ClockPort};

/// Result of reading the clipboard once: an entry ready for the history,
/// `None` when the clipboard holds nothing usable, or the read error.
pub type CaptureResult = Result<Option<ClipboardEntry>>;

/// A single clipboard read, detached from the monitor so it can run on a
/// blocking thread.
pub struct CaptureJob {
    clipboard: Arc<dyn ClipboardPort>,
    clock: Arc<dyn ClockPort>,
}

impl CaptureJob {
    pub(crate) fn new(clipboard: Arc<dyn ClipboardPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { clipboard, clock }
    }

    /// Read the current snapshot and turn it into a classified entry.
    pub fn run(self) -> CaptureResult {
        let payload = self.clipboard.read_snapshot()?;
        Ok(payload.map(|payload| ClipboardEntry::new(payload, self.clock.now_ms())))
    }
}

impl std::fmt::Debug for CaptureJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureJob").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClipboard, ManualClock};
    use ck_core::{ClipboardCategory, ClipboardPayload};

    #[test]
    fn stamps_entries_with_the_clock() {
        let clipboard = Arc::new(FakeClipboard::with_content(ClipboardPayload::text(
            "a@b.co",
        )));
        let clock = Arc::new(ManualClock::new(1_700));

        let entry = CaptureJob::new(clipboard, clock).run().unwrap().unwrap();

        assert_eq!(entry.created_at_ms(), 1_700);
        assert_eq!(entry.category(), ClipboardCategory::Email);
    }

    #[test]
    fn empty_clipboard_yields_no_entry() {
        let job = CaptureJob::new(Arc::new(FakeClipboard::new()), Arc::new(ManualClock::new(0)));
        assert!(job.run().unwrap().is_none());
    }

    #[test]
    fn read_errors_propagate() {
        let clipboard = Arc::new(FakeClipboard::new());
        clipboard.fail_reads(true);

        let job = CaptureJob::new(clipboard, Arc::new(ManualClock::new(0)));
        assert!(job.run().is_err());
    }
}

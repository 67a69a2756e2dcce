//! Port-level expectations for the restore path, checked with mockall.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use ck_app::testing::ManualClock;
use ck_app::{ChangeMonitor, MonitorPhase, SharedHistory};
use ck_core::{ChangeToken, ClipboardEntry, ClipboardPayload, ClipboardPort, MaxHistorySize};
use mockall::{mock, predicate::eq, Sequence};

mock! {
    pub Clipboard {}

    impl ClipboardPort for Clipboard {
        fn change_token(&self) -> ChangeToken;
        fn read_snapshot(&self) -> Result<Option<ClipboardPayload>>;
        fn clear(&self) -> Result<()>;
        fn write_snapshot(&self, payload: &ClipboardPayload) -> Result<()>;
    }
}

fn monitor_over(clipboard: MockClipboard) -> ChangeMonitor {
    ChangeMonitor::new(
        Arc::new(clipboard),
        Arc::new(ManualClock::new(0)),
        SharedHistory::new(MaxHistorySize::new(5).unwrap()),
        false,
    )
}

#[test]
fn restore_clears_then_writes_the_entry_payload() {
    let entry = ClipboardEntry::new(ClipboardPayload::text("C"), 0);
    let token = Arc::new(AtomicU64::new(7));

    let mut clipboard = MockClipboard::new();
    let mut seq = Sequence::new();
    let t = Arc::clone(&token);
    clipboard
        .expect_change_token()
        .returning(move || ChangeToken(t.load(Ordering::SeqCst)));
    let t = Arc::clone(&token);
    clipboard
        .expect_clear()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move || {
            t.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    let t = Arc::clone(&token);
    clipboard
        .expect_write_snapshot()
        .with(eq(ClipboardPayload::text("C")))
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| {
            t.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    clipboard.expect_read_snapshot().never();

    let mut monitor = monitor_over(clipboard);
    monitor.start();
    monitor.begin_restore(&entry).unwrap();

    assert_eq!(monitor.last_change_token(), ChangeToken(9));
    monitor.finish_restore();
    assert!(monitor.tick().is_none());
}

#[test]
fn failed_clear_skips_the_write() {
    let mut clipboard = MockClipboard::new();
    clipboard.expect_change_token().return_const(ChangeToken(1));
    clipboard
        .expect_clear()
        .times(1)
        .returning(|| Err(anyhow!("pasteboard locked")));
    clipboard.expect_write_snapshot().never();

    let mut monitor = monitor_over(clipboard);
    monitor.start();
    let entry = ClipboardEntry::new(ClipboardPayload::url("https://example.com"), 0);

    assert!(monitor.begin_restore(&entry).is_err());
    assert_eq!(monitor.phase(), MonitorPhase::SuppressedForWrite);
    monitor.finish_restore();
    assert_eq!(monitor.phase(), MonitorPhase::Polling);
}

//! In-memory port implementations for exercising the engine without a
//! system clipboard.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use ck_core::{ChangeToken, ClipboardPayload, ClipboardPort, ClockPort};

#[derive(Debug, Default)]
struct FakeState {
    token: u64,
    content: Option<ClipboardPayload>,
    writes: Vec<ClipboardPayload>,
    clears: usize,
    reads: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// A clipboard that lives in memory and bumps its change token on every
/// mutation, the way a platform pasteboard does.
#[derive(Debug, Default)]
pub struct FakeClipboard {
    state: Mutex<FakeState>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(payload: ClipboardPayload) -> Self {
        let clipboard = Self::new();
        clipboard.state().content = Some(payload);
        clipboard
    }

    /// Simulate another application copying `payload`.
    pub fn copy_external(&self, payload: ClipboardPayload) {
        let mut state = self.state();
        state.token += 1;
        state.content = Some(payload);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    pub fn content(&self) -> Option<ClipboardPayload> {
        self.state().content.clone()
    }

    pub fn writes(&self) -> Vec<ClipboardPayload> {
        self.state().writes.clone()
    }

    pub fn clears(&self) -> usize {
        self.state().clears
    }

    pub fn reads(&self) -> usize {
        self.state().reads
    }

    pub fn token(&self) -> ChangeToken {
        ChangeToken(self.state().token)
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl ClipboardPort for FakeClipboard {
    fn change_token(&self) -> ChangeToken {
        self.token()
    }

    fn read_snapshot(&self) -> Result<Option<ClipboardPayload>> {
        let mut state = self.state();
        state.reads += 1;
        if state.fail_reads {
            return Err(anyhow!("pasteboard unavailable"));
        }
        Ok(state.content.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut state = self.state();
        state.token += 1;
        state.clears += 1;
        state.content = None;
        Ok(())
    }

    fn write_snapshot(&self, payload: &ClipboardPayload) -> Result<()> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(anyhow!("pasteboard rejected the write"));
        }
        state.token += 1;
        state.content = Some(payload.clone());
        state.writes.push(payload.clone());
        Ok(())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

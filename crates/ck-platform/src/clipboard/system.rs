use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use ck_core::{ChangeToken, ClipboardPayload, ClipboardPort, ImagePreviewPort};
use clipboard_rs::{Clipboard, ClipboardContext};
use log::{debug, trace};

use super::change_token::{content_fingerprint, native_change_count, FingerprintTracker};
use super::codec;

/// The desktop clipboard, read and written through clipboard-rs.
pub struct SystemClipboard {
    inner: Mutex<ClipboardContext>,
    previews: Arc<dyn ImagePreviewPort>,
    fingerprints: FingerprintTracker,
}

impl SystemClipboard {
    pub fn new(previews: Arc<dyn ImagePreviewPort>) -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Mutex::new(context),
            previews,
            fingerprints: FingerprintTracker::default(),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))
    }
}

impl ClipboardPort for SystemClipboard {
    fn change_token(&self) -> ChangeToken {
        if let Some(count) = native_change_count() {
            return ChangeToken(count);
        }

        // A capture holding the context means the content is being read
        // right now; report the last token and look again on the next tick.
        match self.inner.try_lock() {
            Ok(ctx) => {
                let token = self.fingerprints.observe(content_fingerprint(&ctx));
                trace!("clipboard fingerprint token {token}");
                token
            }
            Err(_) => self.fingerprints.current(),
        }
    }

    fn read_snapshot(&self) -> Result<Option<ClipboardPayload>> {
        let mut ctx = self.context()?;
        let payload = codec::read_payload(&mut ctx, self.previews.as_ref())?;
        if let Some(payload) = &payload {
            debug!(
                "Read clipboard payload kind={} bytes={}",
                payload.kind_name(),
                payload.size_bytes()
            );
        }
        Ok(payload)
    }

    fn clear(&self) -> Result<()> {
        let ctx = self.context()?;
        ctx.clear().map_err(|e| anyhow!(e))
    }

    fn write_snapshot(&self, payload: &ClipboardPayload) -> Result<()> {
        let mut ctx = self.context()?;
        codec::write_payload(&mut ctx, payload)?;
        debug!("Wrote clipboard payload kind={}", payload.kind_name());
        Ok(())
    }
}

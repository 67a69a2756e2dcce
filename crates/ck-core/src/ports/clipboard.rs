//! Clipboard port - abstracts system clipboard access
//!
//! The engine only needs three things from the clipboard medium: a cheap
//! change counter, a way to read the current content and a way to replace
//! it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardPayload;

/// Opaque, monotonically non-decreasing change counter of the clipboard.
///
/// A different value than the last observed one means the clipboard content
/// was replaced since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ChangeToken(pub u64);

impl ChangeToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clipboard port
///
/// 系统剪贴板端口。
///
/// # Behavior / 行为
/// - Implemented by the platform layer. Calls are made from the monitor
///   runtime and from the blocking pool during captures, so implementations
///   must be `Send + Sync`.
/// - A successful `clear` or `write_snapshot` moves the change token.
///
/// - 由平台层实现，会同时在监控运行时和阻塞线程池中被调用。
/// - 成功的 `clear` 或 `write_snapshot` 会改变 change token。
pub trait ClipboardPort: Send + Sync {
    /// Current change token. Must be cheap; it is called on every poll tick.
    fn change_token(&self) -> ChangeToken;

    /// Read the current content.
    ///
    /// `Ok(None)` when the clipboard is empty or holds no supported format.
    /// `Err` is reserved for failures talking to the clipboard itself.
    fn read_snapshot(&self) -> Result<Option<ClipboardPayload>>;

    /// Remove all content from the clipboard.
    fn clear(&self) -> Result<()>;

    /// Replace the clipboard content with `payload`.
    ///
    /// Rich text is written as both its formatted data and its plain-text
    /// fallback.
    fn write_snapshot(&self, payload: &ClipboardPayload) -> Result<()>;
}

impl<T: ClipboardPort + ?Sized> ClipboardPort for std::sync::Arc<T> {
    fn change_token(&self) -> ChangeToken {
        (**self).change_token()
    }

    fn read_snapshot(&self) -> Result<Option<ClipboardPayload>> {
        (**self).read_snapshot()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn write_snapshot(&self, payload: &ClipboardPayload) -> Result<()> {
        (**self).write_snapshot(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;

    /// Counts read calls to catch a blanket impl that recurses into itself.
    struct CountingClipboard {
        reads: AtomicU8,
    }

    impl ClipboardPort for CountingClipboard {
        fn change_token(&self) -> ChangeToken {
            ChangeToken(7)
        }

        fn read_snapshot(&self) -> Result<Option<ClipboardPayload>> {
            let previous = self.reads.fetch_add(1, Ordering::SeqCst);
            assert_eq!(previous, 0, "read_snapshot called recursively");
            Ok(Some(ClipboardPayload::text("hi")))
        }

        fn clear(&self) -> Result<()> {
            Ok(())
        }

        fn write_snapshot(&self, _payload: &ClipboardPayload) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn clipboard_port_is_object_safe() {
        let port: Arc<dyn ClipboardPort> = Arc::new(CountingClipboard {
            reads: AtomicU8::new(0),
        });
        assert_eq!(port.change_token(), ChangeToken(7));
    }

    #[test]
    fn arc_impl_delegates_once() {
        let port = Arc::new(CountingClipboard {
            reads: AtomicU8::new(0),
        });
        let payload = ClipboardPort::read_snapshot(&port).unwrap();
        assert_eq!(payload, Some(ClipboardPayload::text("hi")));
        assert_eq!(port.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tokens_order_by_value() {
        assert!(ChangeToken(1) < ChangeToken(2));
        assert_eq!(ChangeToken::default().value(), 0);
    }
}

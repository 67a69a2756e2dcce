//! Clipboard change detection.

mod capture;
mod change_monitor;

pub use capture::{CaptureJob, CaptureResult};
pub use change_monitor::{CaptureOutcome, ChangeMonitor, MonitorPhase, PollOutcome, StartOutcome};

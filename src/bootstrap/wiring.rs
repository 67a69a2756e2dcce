use std::sync::Arc;

use anyhow::Context;
use ck_app::ClipboardEngine;
use ck_core::{ClipboardPort, ClockPort, EngineConfig, ImagePreviewPort};
use ck_infra::{ImagePreviewDecoder, SystemClock};
use ck_platform::SystemClipboard;

/// Assemble an engine over the desktop clipboard.
pub fn build_system_engine(config: EngineConfig) -> anyhow::Result<ClipboardEngine> {
    let previews: Arc<dyn ImagePreviewPort> = Arc::new(ImagePreviewDecoder::default());
    let clipboard: Arc<dyn ClipboardPort> =
        Arc::new(SystemClipboard::new(previews).context("open system clipboard")?);
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    build_engine(config, clipboard, clock)
}

pub fn build_engine(
    config: EngineConfig,
    clipboard: Arc<dyn ClipboardPort>,
    clock: Arc<dyn ClockPort>,
) -> anyhow::Result<ClipboardEngine> {
    ClipboardEngine::new(config, clipboard, clock).context("build clipboard engine")
}

use ck_core::{ConfigError, EntryId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("failed to write clipboard: {0}")]
    ClipboardWrite(String),

    #[error("no history entry with id {0}")]
    EntryNotFound(EntryId),

    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("clipboard engine runtime is not running")]
    RuntimeClosed,
}

mod change_token;
mod codec;
pub mod rtf;
mod system;

pub use system::SystemClipboard;

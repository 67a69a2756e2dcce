pub mod media;
pub mod time;

pub use media::ImagePreviewDecoder;
pub use time::SystemClock;

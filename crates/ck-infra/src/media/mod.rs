mod preview_decoder;

pub use preview_decoder::ImagePreviewDecoder;

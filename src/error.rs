use thiserror::Error;

#[derive(Debug, Error)]
pub enum TapeError {
    #[error("unsupported tape width: {0} bits (expected 5 or 8)")]
    UnsupportedWidth(u32),
    #[error("cannot build an image from an empty tape")]
    EmptyImage,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

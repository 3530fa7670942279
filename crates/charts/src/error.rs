use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw panel '{panel}': {message}")]
    Draw { panel: &'static str, message: String },

    #[error("Pixel buffer does not match a {width}x{height} canvas")]
    Buffer { width: u32, height: u32 },

    #[error("Failed to write chart image: {0}")]
    Image(#[from] image::ImageError),
}

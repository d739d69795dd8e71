use thiserror::Error;

/// Errors raised at the fallible edges of the sketchpad (surfaces, export and configuration)
#[derive(Debug, Error)]
pub enum SketchError {
    /// The rendered canvas could not be encoded as an image
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    /// Reading a config file or writing an export failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for [`crate::SketchConfig`]
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    /// A surface would exceed the pixel limit, or have no pixels at all
    #[error("surface of {width}x{height} pixels is out of range")]
    SurfaceSize { width: u64, height: u64 },
    /// The browser refused to create or trigger the download
    #[error("download failed: {0}")]
    Download(String),
}

pub type SketchResult<T> = Result<T, SketchError>;

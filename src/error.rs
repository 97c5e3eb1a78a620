use thiserror::Error;

/// Errors reported by the drawing board to whoever invoked the operation.
///
/// Undo, redo and clear never fail: on an empty history they are no-ops.
#[derive(Debug, Error)]
pub enum DrawError {
    /// A stroke width that is not a positive finite number, an empty stamp
    /// glyph, or a paint descriptor that cannot be parsed.
    #[error("Invalid tool parameter: {0}")]
    InvalidToolParameter(String),

    /// The offscreen export surface could not be allocated.
    #[error("Export surface of {width}x{height} pixels is unavailable")]
    ExportSurfaceUnavailable { width: f32, height: f32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The browser refused to hand the exported image to the user.
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for drawing board operations
pub type DrawResult<T> = Result<T, DrawError>;

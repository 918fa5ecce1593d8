pub type WallforgeResult<T> = Result<T, WallforgeError>;

#[derive(thiserror::Error, Debug)]
pub enum WallforgeError {
    #[error("unknown palette '{0}'")]
    UnknownPalette(String),

    #[error("malformed color '{0}': expected 6 hex digits, optionally '#'-prefixed")]
    MalformedColor(String),

    #[error("invalid canvas dimensions {0}x{1}: width and height must be > 0")]
    InvalidDimensions(u32, u32),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallforgeError {
    pub fn unknown_palette(name: impl Into<String>) -> Self {
        Self::UnknownPalette(name.into())
    }

    pub fn malformed_color(raw: impl Into<String>) -> Self {
        Self::MalformedColor(raw.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result alias used across the crate.
pub type ArcTextResult<T> = Result<T, ArcTextError>;

/// Failures surfaced by the curved-text engine and its ports.
///
/// Layout, trim and conversion failures are recovered where they happen; they only
/// travel as values (logged, or attached to a report) and never stop a render pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ArcTextError {
    /// Text could not be measured or laid out along the arc.
    #[error("layout error: {0}")]
    Layout(String),

    /// A generated raster had no opaque pixel to trim to.
    #[error("trim error: {0}")]
    Trim(String),

    /// A Flat/Curved swap could not find its source object.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Allocating, drawing on or reading back a drawing surface failed.
    #[error("surface error: {0}")]
    Surface(String),

    /// Command or configuration payload could not be decoded.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl ArcTextError {
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn trim(msg: impl Into<String>) -> Self {
        Self::Trim(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ArcTextError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../tests/unit/error.rs"]
mod tests;

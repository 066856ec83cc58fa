//! Display state for the stored image

/// Shown when the initial image URL cannot be fetched
pub const INITIAL_LOAD_ERROR: &str = "Could not fetch image URL. Please try again later.";
/// Shown when a finished upload cannot be displayed
pub const DISPLAY_ERROR: &str = "Error displaying uploaded image.";

/// What the image panel currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageView {
    /// No image requested yet
    #[default]
    Empty,
    /// Waiting for a signed GET URL
    Loading,
    /// Ready to render
    Loaded { key: String, url: String },
    /// The URL could not be obtained
    Failed { message: String },
}

impl ImageView {
    /// Signed URL to render, if any
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Loaded { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Key of the displayed object, if any
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Loaded { key, .. } => Some(key),
            _ => None,
        }
    }
}

use std::sync::Arc;

/// 1x1 fully transparent PNG shown when no thumbnail can be resolved.
pub const TRANSPARENT_PLACEHOLDER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Image the seek bar should show for a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekPreview {
    /// Server-rendered thumbnail URL.
    Url(String),
    /// Frame decoded from the title's BIF file, as a data URI.
    Frame(Arc<str>),
    /// Nothing available.
    Placeholder,
}

impl SeekPreview {
    /// Image source string suitable for an image view.
    pub fn uri(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Frame(uri) => uri,
            Self::Placeholder => TRANSPARENT_PLACEHOLDER,
        }
    }

    /// Whether no image is available for this position.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri() {
        assert_eq!(SeekPreview::Url("http://x/1.jpg".into()).uri(), "http://x/1.jpg");
        assert_eq!(
            SeekPreview::Frame(Arc::from("data:image/jpeg;base64,AA==")).uri(),
            "data:image/jpeg;base64,AA=="
        );
        assert!(SeekPreview::Placeholder.uri().starts_with("data:image/png;base64,"));
        assert!(SeekPreview::Placeholder.is_placeholder());
    }
}

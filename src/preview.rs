use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::is_false;

/// Thumbnail, preview and CDN settings for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub generate_thumbnails: bool,
    /// Requested sizes as `"WxH"`, e.g. `"150x150"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnail_sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_preview: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_cdn: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cdn_endpoint: String,
}

impl PreviewConfig {
    pub fn is_empty(&self) -> bool {
        *self == PreviewConfig::default()
    }

    pub fn thumbnail_dimensions(&self) -> Result<Vec<ThumbnailSize>, ApiError> {
        self.thumbnail_sizes.iter().map(|s| s.parse()).collect()
    }

    /// Public URL for an object served through the CDN, if one is configured.
    pub fn cdn_url(&self, object_key: &str) -> Option<String> {
        if !self.use_cdn || self.cdn_endpoint.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.cdn_endpoint.trim_end_matches('/'),
            object_key.trim_start_matches('/')
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for ThumbnailSize {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::invalid_config(format!("Invalid thumbnail size: {:?}", s));
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(ThumbnailSize { width, height })
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

use mime::Mime;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::file_utils::{guess_mime_type, is_extension_allowed, is_mime_allowed};
use crate::preview::PreviewConfig;
use crate::validation::{is_false, is_zero, MediaFamily, MediaValidation, ValidationConfig};

pub const DEFAULT_MIN_FILE_SIZE: i64 = 1024;

/// Per-category access rules read by the request middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub require_auth: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub require_owner: bool,
}

impl SecurityConfig {
    pub fn is_empty(&self) -> bool {
        !self.require_auth && !self.require_owner
    }
}

/// Rules for one upload category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bucket_suffix: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_public: bool,
    /// Bytes.
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_types: Vec<String>,
    #[serde(skip_serializing_if = "ValidationConfig::is_empty")]
    pub validation: ValidationConfig,
    /// Replaces the handler's default middleware chain when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub middlewares: Vec<String>,
    #[serde(skip_serializing_if = "SecurityConfig::is_empty")]
    pub security: SecurityConfig,
    #[serde(skip_serializing_if = "PreviewConfig::is_empty")]
    pub preview: PreviewConfig,
}

/// Builds a category with stock validation, security and preview settings.
/// Performs no validation of its own.
pub fn default_category_config(
    bucket_suffix: impl Into<String>,
    is_public: bool,
    max_size: i64,
) -> CategoryConfig {
    CategoryConfig {
        bucket_suffix: bucket_suffix.into(),
        is_public,
        max_size,
        allowed_types: Vec::new(),
        validation: ValidationConfig {
            min_file_size: Some(DEFAULT_MIN_FILE_SIZE),
            max_file_size: Some(max_size),
            ..Default::default()
        },
        middlewares: Vec::new(),
        security: SecurityConfig {
            require_auth: !is_public,
            require_owner: !is_public,
        },
        preview: PreviewConfig {
            generate_thumbnails: false,
            enable_preview: false,
            ..Default::default()
        },
    }
}

impl CategoryConfig {
    /// Checks only the bucket suffix and the size ceiling; every other field
    /// is left to the upload handler.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.bucket_suffix.is_empty() {
            return Err(ApiError::invalid_config("BucketSuffix is required"));
        }
        if self.max_size <= 0 {
            return Err(ApiError::invalid_config("MaxSize must be greater than 0"));
        }
        Ok(())
    }

    pub fn bucket_name(&self, base: &str) -> String {
        if base.is_empty() {
            self.bucket_suffix.clone()
        } else {
            format!("{}-{}", base, self.bucket_suffix)
        }
    }

    pub fn effective_middlewares<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        if self.middlewares.is_empty() {
            defaults
        } else {
            &self.middlewares
        }
    }

    pub fn allows_mime_type(&self, mime_type: &Mime) -> bool {
        is_mime_allowed(&self.allowed_types, mime_type)
    }

    pub fn accepts_filename(&self, filename: &str) -> bool {
        let mime_type = guess_mime_type(filename);
        self.allows_mime_type(&mime_type)
            && is_mime_allowed(&self.validation.allowed_mime_types, &mime_type)
            && is_extension_allowed(&self.validation.allowed_extensions, filename)
    }

    /// The media block to run against an upload of `mime_type`, if any.
    pub fn media_validation_for(&self, mime_type: &Mime) -> Option<&MediaValidation> {
        let family = MediaFamily::of(mime_type)?;
        self.media_validation()
            .filter(|media| media.family() == Some(family))
    }

    /// The media block, if the category's allowed types can ever reach it.
    pub fn media_validation(&self) -> Option<&MediaValidation> {
        let family = self.validation.media.family()?;
        if self.allowed_types.is_empty() {
            return Some(&self.validation.media);
        }
        let reachable = self
            .allowed_types
            .iter()
            .filter_map(|t| t.trim().parse::<Mime>().ok())
            .any(|pattern| family.covers(&pattern));
        if reachable {
            Some(&self.validation.media)
        } else {
            None
        }
    }
}

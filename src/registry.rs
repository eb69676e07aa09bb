use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::category::{default_category_config, CategoryConfig};
use crate::error::RegistryError;
use crate::validation::{
    AudioValidationConfig, ImageValidationConfig, MediaValidation, PdfValidationConfig,
    VideoValidationConfig,
};

const MIB: i64 = 1024 * 1024;

/// Named upload categories, validated once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, CategoryConfig>,
}

impl CategoryRegistry {
    pub fn new(categories: BTreeMap<String, CategoryConfig>) -> Result<Self, RegistryError> {
        for (name, config) in &categories {
            config.validate().map_err(|source| RegistryError::Invalid {
                category: name.clone(),
                source,
            })?;
            debug!(
                "Category {}: bucket suffix {}, max size {}",
                name, config.bucket_suffix, config.max_size
            );
        }
        if categories.is_empty() {
            warn!("Category registry is empty; every lookup will miss");
        }
        info!("Loaded {} upload categories", categories.len());
        Ok(Self { categories })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let categories: BTreeMap<String, CategoryConfig> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        info!("Reading category definitions from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin_categories())
    }

    pub fn get(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryConfig)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn categories(&self) -> &BTreeMap<String, CategoryConfig> {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Stock categories used when no definitions file is configured.
pub fn builtin_categories() -> BTreeMap<String, CategoryConfig> {
    let mut categories = BTreeMap::new();

    let mut profile_images = default_category_config("profile-images", true, 5 * MIB);
    profile_images.allowed_types = vec![
        "image/jpeg".into(),
        "image/png".into(),
        "image/webp".into(),
    ];
    profile_images.validation.allowed_extensions =
        vec!["jpg".into(), "jpeg".into(), "png".into(), "webp".into()];
    profile_images.validation.media = MediaValidation::Image(ImageValidationConfig {
        min_width: Some(64),
        max_width: Some(4096),
        min_height: Some(64),
        max_height: Some(4096),
        min_quality: Some(60),
        max_quality: Some(100),
        allowed_formats: vec!["jpeg".into(), "png".into(), "webp".into()],
        min_aspect_ratio: Some(0.5),
        max_aspect_ratio: Some(2.0),
        allowed_color_spaces: vec!["srgb".into()],
    });
    profile_images.preview.generate_thumbnails = true;
    profile_images.preview.thumbnail_sizes = vec!["64x64".into(), "256x256".into()];
    categories.insert("profile_images".to_string(), profile_images);

    let mut documents = default_category_config("documents", false, 10 * MIB);
    documents.allowed_types = vec!["application/pdf".into()];
    documents.validation.allowed_extensions = vec!["pdf".into()];
    documents.validation.media = MediaValidation::Pdf(PdfValidationConfig {
        validate_structure: true,
        min_pages: Some(1),
        max_pages: Some(500),
        allow_password_protected: false,
        allow_javascript: false,
        ..Default::default()
    });
    documents.preview.enable_preview = true;
    documents.preview.preview_formats = vec!["png".into()];
    categories.insert("documents".to_string(), documents);

    let mut videos = default_category_config("videos", false, 100 * MIB);
    videos.allowed_types = vec!["video/mp4".into(), "video/webm".into()];
    videos.validation.media = MediaValidation::Video(VideoValidationConfig {
        max_duration: Some(600),
        max_width: Some(3840),
        max_height: Some(2160),
        allowed_codecs: vec!["h264".into(), "vp9".into(), "av1".into()],
        max_framerate: Some(60.0),
        ..Default::default()
    });
    categories.insert("videos".to_string(), videos);

    let mut audio = default_category_config("audio", false, 20 * MIB);
    audio.allowed_types = vec!["audio/*".into()];
    audio.validation.media = MediaValidation::Audio(AudioValidationConfig {
        max_duration: Some(3600),
        min_bitrate: Some(64),
        max_bitrate: Some(320),
        allowed_formats: vec!["mp3".into(), "ogg".into(), "wav".into()],
        min_sample_rate: Some(22_050),
        max_sample_rate: Some(96_000),
        ..Default::default()
    });
    categories.insert("audio".to_string(), audio);

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["audio", "documents", "profile_images", "videos"]
        );
        let profile = registry.get("profile_images").unwrap();
        assert!(profile.is_public);
        assert!(!profile.security.require_auth);
        assert!(registry.get("documents").unwrap().security.require_owner);
        for (_, config) in registry.iter() {
            assert!(config.media_validation().is_some());
        }
        assert!(profile.preview.thumbnail_dimensions().is_ok());
    }

    #[test]
    fn test_rejects_invalid_entry() {
        let err = CategoryRegistry::from_json_str(
            r#"{"ok": {"bucket_suffix": "ok", "max_size": 10}, "broken": {"bucket_suffix": "b", "max_size": 0}}"#,
        )
        .unwrap_err();
        match err {
            RegistryError::Invalid { category, source } => {
                assert_eq!(category, "broken");
                assert!(source.message.contains("MaxSize"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CategoryRegistry::from_json_str("[1, 2"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"avatars": {{"bucket_suffix": "avatars", "is_public": true, "max_size": 1048576}}}}"#
        )
        .unwrap();
        let registry = CategoryRegistry::from_path(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("avatars").unwrap().max_size, 1_048_576);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CategoryRegistry::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}

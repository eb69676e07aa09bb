use mime::Mime;
use serde::{Deserialize, Serialize};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Bounds at `None` or at their zero value stay off the wire.
pub(crate) fn is_unset<T: Default + PartialEq>(value: &Option<T>) -> bool {
    value.as_ref().map_or(true, |v| *v == T::default())
}

/// Upload checks for a category. At most one media-specific block applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValidationWire", into = "ValidationWire")]
pub struct ValidationConfig {
    pub min_file_size: Option<i64>,
    pub max_file_size: Option<i64>,
    pub allowed_mime_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
    pub media: MediaValidation,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MediaValidation {
    #[default]
    None,
    Image(ImageValidationConfig),
    Pdf(PdfValidationConfig),
    Video(VideoValidationConfig),
    Audio(AudioValidationConfig),
}

impl MediaValidation {
    pub fn family(&self) -> Option<MediaFamily> {
        match self {
            MediaValidation::None => None,
            MediaValidation::Image(_) => Some(MediaFamily::Image),
            MediaValidation::Pdf(_) => Some(MediaFamily::Pdf),
            MediaValidation::Video(_) => Some(MediaFamily::Video),
            MediaValidation::Audio(_) => Some(MediaFamily::Audio),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MediaValidation::None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageValidationConfig {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_height: Option<u32>,
    /// 1-100
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_quality: Option<u8>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_color_spaces: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfValidationConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub validate_structure: bool,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub require_metadata: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_metadata_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_password_protected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_javascript: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoValidationConfig {
    /// Seconds.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_codecs: Vec<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_framerate: Option<f64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_framerate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioValidationConfig {
    /// Seconds.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_duration: Option<u64>,
    /// kbps
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_formats: Vec<String>,
    /// Hz
    #[serde(default, skip_serializing_if = "is_unset")]
    pub min_sample_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub max_sample_rate: Option<u32>,
}

/// On-the-wire form of [`ValidationConfig`]: one optional key per media block.
#[derive(Default, Serialize, Deserialize)]
struct ValidationWire {
    #[serde(default, skip_serializing_if = "is_unset")]
    min_file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    max_file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    allowed_mime_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    allowed_extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImageValidationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pdf: Option<PdfValidationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<VideoValidationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<AudioValidationConfig>,
}

impl TryFrom<ValidationWire> for ValidationConfig {
    type Error = String;

    fn try_from(wire: ValidationWire) -> Result<Self, Self::Error> {
        let media = match (wire.image, wire.pdf, wire.video, wire.audio) {
            (None, None, None, None) => MediaValidation::None,
            (Some(image), None, None, None) => MediaValidation::Image(image),
            (None, Some(pdf), None, None) => MediaValidation::Pdf(pdf),
            (None, None, Some(video), None) => MediaValidation::Video(video),
            (None, None, None, Some(audio)) => MediaValidation::Audio(audio),
            _ => {
                return Err(
                    "at most one media validation block (image, pdf, video, audio) may be set"
                        .to_string(),
                )
            }
        };
        Ok(ValidationConfig {
            min_file_size: wire.min_file_size,
            max_file_size: wire.max_file_size,
            allowed_mime_types: wire.allowed_mime_types,
            allowed_extensions: wire.allowed_extensions,
            media,
        })
    }
}

impl From<ValidationConfig> for ValidationWire {
    fn from(config: ValidationConfig) -> Self {
        let mut wire = ValidationWire {
            min_file_size: config.min_file_size,
            max_file_size: config.max_file_size,
            allowed_mime_types: config.allowed_mime_types,
            allowed_extensions: config.allowed_extensions,
            ..Default::default()
        };
        match config.media {
            MediaValidation::None => {}
            MediaValidation::Image(image) => wire.image = Some(image),
            MediaValidation::Pdf(pdf) => wire.pdf = Some(pdf),
            MediaValidation::Video(video) => wire.video = Some(video),
            MediaValidation::Audio(audio) => wire.audio = Some(audio),
        }
        wire
    }
}

impl ValidationConfig {
    pub fn is_empty(&self) -> bool {
        is_unset(&self.min_file_size)
            && is_unset(&self.max_file_size)
            && self.allowed_mime_types.is_empty()
            && self.allowed_extensions.is_empty()
            && self.media.is_none()
    }
}

/// Media families a media validation block can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFamily {
    Image,
    Pdf,
    Video,
    Audio,
}

impl MediaFamily {
    pub fn of(mime: &Mime) -> Option<MediaFamily> {
        if mime.type_() == mime::IMAGE {
            Some(MediaFamily::Image)
        } else if mime.type_() == mime::VIDEO {
            Some(MediaFamily::Video)
        } else if mime.type_() == mime::AUDIO {
            Some(MediaFamily::Audio)
        } else if mime.essence_str() == mime::APPLICATION_PDF.essence_str() {
            Some(MediaFamily::Pdf)
        } else {
            None
        }
    }

    /// Whether an allowed-type pattern such as `image/*` admits any member of this family.
    pub fn covers(&self, pattern: &Mime) -> bool {
        if pattern.type_() == mime::STAR {
            return true;
        }
        match self {
            MediaFamily::Image => pattern.type_() == mime::IMAGE,
            MediaFamily::Video => pattern.type_() == mime::VIDEO,
            MediaFamily::Audio => pattern.type_() == mime::AUDIO,
            MediaFamily::Pdf => {
                pattern.type_() == mime::APPLICATION
                    && (pattern.subtype() == mime::PDF || pattern.subtype() == mime::STAR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_validation_serializes_to_empty_object() {
        let json = serde_json::to_string(&ValidationConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_media_block_uses_family_key() {
        let config = ValidationConfig {
            media: MediaValidation::Pdf(PdfValidationConfig {
                validate_structure: true,
                max_pages: Some(200),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["pdf"]["validate_structure"], true);
        assert_eq!(json["pdf"]["max_pages"], 200);
        assert!(json.get("image").is_none());
        assert!(json["pdf"].get("allow_javascript").is_none());
    }

    #[test]
    fn test_decode_single_block() {
        let config: ValidationConfig = serde_json::from_str(
            r#"{"min_file_size": 1024, "audio": {"min_bitrate": 128, "allowed_formats": ["mp3"]}}"#,
        )
        .unwrap();
        assert_eq!(config.min_file_size, Some(1024));
        match config.media {
            MediaValidation::Audio(audio) => {
                assert_eq!(audio.min_bitrate, Some(128));
                assert_eq!(audio.allowed_formats, vec!["mp3".to_string()]);
            }
            other => panic!("expected audio block, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_multiple_blocks() {
        let err = serde_json::from_str::<ValidationConfig>(r#"{"image": {}, "video": {}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("at most one media validation block"));
    }

    #[test]
    fn test_zero_bounds_are_omitted() {
        let config = ValidationConfig {
            min_file_size: Some(0),
            max_file_size: Some(1),
            media: MediaValidation::Video(VideoValidationConfig {
                min_duration: Some(0),
                min_framerate: Some(0.0),
                max_framerate: Some(30.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("min_file_size").is_none());
        assert_eq!(json["max_file_size"], 1);
        assert!(json["video"].get("min_duration").is_none());
        assert!(json["video"].get("min_framerate").is_none());
        assert_eq!(json["video"]["max_framerate"], 30.0);
    }

    #[test]
    fn test_empty_media_block_keeps_its_key() {
        let config = ValidationConfig {
            media: MediaValidation::Pdf(PdfValidationConfig::default()),
            ..Default::default()
        };
        assert!(!config.is_empty());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"pdf":{}}"#);
        let decoded: ValidationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
        assert!(ValidationConfig { min_file_size: Some(0), ..Default::default() }.is_empty());
    }

    #[test]
    fn test_family_of() {
        assert_eq!(MediaFamily::of(&mime::IMAGE_PNG), Some(MediaFamily::Image));
        assert_eq!(MediaFamily::of(&mime::APPLICATION_PDF), Some(MediaFamily::Pdf));
        assert_eq!(
            MediaFamily::of(&"video/mp4".parse().unwrap()),
            Some(MediaFamily::Video)
        );
        assert_eq!(MediaFamily::of(&mime::APPLICATION_JSON), None);
    }

    #[test]
    fn test_family_covers_patterns() {
        let image_star: Mime = "image/*".parse().unwrap();
        let any: Mime = "*/*".parse().unwrap();
        assert!(MediaFamily::Image.covers(&image_star));
        assert!(!MediaFamily::Audio.covers(&image_star));
        assert!(MediaFamily::Pdf.covers(&mime::APPLICATION_PDF));
        assert!(!MediaFamily::Pdf.covers(&mime::APPLICATION_JSON));
        assert!(MediaFamily::Video.covers(&any));
    }
}

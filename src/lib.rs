mod config;
pub mod category;
pub mod error;
pub mod file_utils;
pub mod handlers;
pub mod preview;
pub mod registry;
pub mod validation;
use std::sync::Arc;
pub use category::{default_category_config, CategoryConfig, SecurityConfig};
pub use config::{Config, ConfigError};
pub use error::{ApiError, ErrorCode, RegistryError};
pub use handlers::{about, get_category, list_categories, validate_category};
pub use preview::{PreviewConfig, ThumbnailSize};
pub use registry::{builtin_categories, CategoryRegistry};
pub use validation::{
    AudioValidationConfig, ImageValidationConfig, MediaFamily, MediaValidation,
    PdfValidationConfig, ValidationConfig, VideoValidationConfig,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<CategoryRegistry>,
    pub bucket_prefix: String,
}

pub fn create_app_state(registry: CategoryRegistry, bucket_prefix: impl Into<String>) -> AppState {
    AppState {
        registry: Arc::new(registry),
        bucket_prefix: bucket_prefix.into(),
    }
}

pub fn config(cfg: &mut actix_web::web::ServiceConfig) {
    let cors = actix_cors::Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    cfg.service(
        actix_web::web::scope("")
            .wrap(cors)
            .service(handlers::list_categories)
            .service(handlers::validate_category)
            .service(handlers::get_category)
            .service(handlers::about)
    );
}

pub fn routes(cfg: &mut actix_web::web::ServiceConfig) {
    config(cfg);
}

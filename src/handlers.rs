use super::AppState;
use actix_web::{get, post, web, HttpResponse, Result};
use log::{debug, info};

use crate::category::CategoryConfig;
use crate::error::ApiError;

#[derive(serde::Serialize)]
pub struct CategoryResponse<'a> {
    pub name: &'a str,
    pub bucket_name: String,
    #[serde(flatten)]
    pub config: &'a CategoryConfig,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[get("/categories")]
pub async fn list_categories(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.registry.categories())
}

#[get("/categories/{name}")]
pub async fn get_category(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    let config = data.registry.get(&name).ok_or_else(|| {
        debug!("Lookup for unknown category {}", name);
        ApiError::category_not_found(&name)
    })?;
    Ok(HttpResponse::Ok().json(CategoryResponse {
        name: &name,
        bucket_name: config.bucket_name(&data.bucket_prefix),
        config,
    }))
}

#[post("/categories/validate")]
pub async fn validate_category(
    req: web::Json<CategoryConfig>,
) -> Result<HttpResponse, ApiError> {
    if let Err(e) = req.validate() {
        info!("Rejected category definition: {}", e);
        return Err(e);
    }
    Ok(HttpResponse::Ok().json(ValidateResponse { valid: true }))
}

#[get("/about")]
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(
        "Stowage Categories - Upload Category Registry\n\
Serves the upload category definitions a storage API enforces against object storage.\n\
\nFeatures:\n\
- Per-category bucket suffix, visibility and size ceiling\n\
- Allowed MIME types and extensions\n\
- Image, PDF, video and audio validation rules\n\
- Thumbnail, preview and CDN settings\n\
- Definition checks before deployment\n"
    )
}

//! Style endpoints: CRUD with multipart image upload.
//!
//! Create and update accept `multipart/form-data` with text fields (`name`,
//! `category`, `description`) and the image under `styleImage`. The image
//! is required on create and optional on update.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;

use atelier_core::errors::DomainError;
use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::{ImageStorage, ImageUpload};

use crate::dto::style_dto::{StyleForm, StyleSearchQuery};
use crate::dto::parse_id;
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "styleImage";

/// Upload cap; anything larger is rejected before touching storage.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Drains a multipart payload into the text form and the optional image.
async fn collect_form(
    mut payload: Multipart,
) -> Result<(StyleForm, Option<ImageUpload>), DomainError> {
    let mut form = StyleForm::default();
    let mut image = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| DomainError::bad_request(format!("Malformed multipart payload: {e}")))?
    {
        let name = field.name().to_string();

        if name == IMAGE_FIELD {
            let content_type = field
                .content_type()
                .map(|mime| mime.to_string())
                .unwrap_or_default();
            if !content_type.starts_with("image/") {
                return Err(DomainError::bad_request(
                    "Not an image. Please upload only images",
                ));
            }

            let file_name = field
                .content_disposition()
                .get_filename()
                .unwrap_or("upload")
                .to_string();

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(|e| {
                DomainError::bad_request(format!("Failed to read upload: {e}"))
            })? {
                if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                    return Err(DomainError::bad_request(
                        "Image too large. Maximum size is 5MB",
                    ));
                }
                bytes.extend_from_slice(&chunk);
            }

            image = Some(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(|e| {
                DomainError::bad_request(format!("Failed to read field {name}: {e}"))
            })? {
                value.extend_from_slice(&chunk);
            }
            let value = String::from_utf8(value).map_err(|_| {
                DomainError::bad_request(format!("Field {name} is not valid UTF-8"))
            })?;
            form.set_field(&name, value);
        }
    }

    Ok((form, image))
}

/// Handler for POST /api/v1/styles
///
/// # Errors
/// - 400 Bad Request: non-image upload, oversized image, broken payload
/// - 422 Unprocessable Entity: missing name/category/image, bad category
pub async fn create_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    payload: Multipart,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let result = async {
        let (form, image) = collect_form(payload).await?;
        let image = image.ok_or_else(|| {
            DomainError::validation(
                "Invalid input data",
                vec![atelier_shared::types::FieldError::new(
                    IMAGE_FIELD,
                    "Style image is required",
                )],
            )
        })?;
        let draft = form.into_draft()?;
        state.style_service.create(draft, image).await
    }
    .await;

    match result {
        Ok(style) => HttpResponse::Created().json(serde_json::json!({
            "status": "success",
            "data": { "style": style },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/styles
///
/// Optional `category` (exact) and `name` (case-insensitive substring)
/// query filters.
pub async fn list_styles<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    query: web::Query<StyleSearchQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let category = match query.parsed_category() {
        Ok(category) => category,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    match state
        .style_service
        .search(category, query.name.as_deref())
        .await
    {
        Ok(styles) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "results": styles.len(),
            "data": { "styles": styles },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/styles/{id}
pub async fn get_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    match state.style_service.get(id).await {
        Ok(style) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "data": { "style": style },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for PUT /api/v1/styles/{id}
///
/// Accepts any subset of the multipart fields; a new `styleImage` replaces
/// the hosted image and the old one is deleted after the record persists.
pub async fn update_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<String>,
    payload: Multipart,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    let result = async {
        let (form, image) = collect_form(payload).await?;
        let changes = form.into_changes()?;
        state.style_service.update(id, changes, image).await
    }
    .await;

    match result {
        Ok(style) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "data": { "style": style },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for DELETE /api/v1/styles/{id}
///
/// Deletes the style, detaches it from every client and removes the
/// hosted image.
pub async fn delete_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    match state.style_service.delete(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

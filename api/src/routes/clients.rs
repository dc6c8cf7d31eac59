//! Client endpoints: CRUD, search and style linking.
//!
//! All routes require authentication. Lookups by id validate the id shape
//! first, so a malformed id is a 400 naming the value rather than a 404.

use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::clients::ClientWithStyles;
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::client_dto::{
    ClientSearchQuery, CreateClientRequest, LinkStyleRequest, UpdateClientRequest,
};
use crate::dto::{parse_id, validate_request};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

fn client_with_styles_body(detail: &ClientWithStyles) -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "data": {
            "client": detail.client,
            "styles": detail.styles,
        },
    })
}

/// Handler for POST /api/v1/clients
///
/// # Errors
/// - 409 Conflict: phone number already registered
/// - 422 Unprocessable Entity: missing name/phone or malformed phone/email
pub async fn create_client<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    request: web::Json<CreateClientRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    if let Err(error) = validate_request(&request.0)
        .and_then(|()| request.check_phone())
        .and_then(|()| request.check_measurements())
    {
        return handle_domain_error(error, state.environment);
    }

    match state.client_service.create(request.0.into_draft()).await {
        Ok(client) => HttpResponse::Created().json(serde_json::json!({
            "status": "success",
            "data": { "client": client },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/clients
///
/// Optional `name` and `eventType` query parameters filter by
/// case-insensitive substring.
pub async fn list_clients<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    query: web::Query<ClientSearchQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    match state
        .client_service
        .search(query.name.as_deref(), query.event_type.as_deref())
        .await
    {
        Ok(clients) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "results": clients.len(),
            "data": { "clients": clients },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/clients/{id}
///
/// Returns the client with its linked styles resolved to full records.
pub async fn get_client<U, C, S, O, I>(
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

    match state.client_service.get(id).await {
        Ok(detail) => HttpResponse::Ok().json(client_with_styles_body(&detail)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for PUT /api/v1/clients/{id}
pub async fn update_client<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<String>,
    request: web::Json<UpdateClientRequest>,
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

    if let Err(error) = validate_request(&request.0)
        .and_then(|()| request.check_phone())
        .and_then(|()| request.check_email())
        .and_then(|()| request.check_measurements())
    {
        return handle_domain_error(error, state.environment);
    }

    match state
        .client_service
        .update(id, request.0.into_changes())
        .await
    {
        Ok(client) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "data": { "client": client },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for DELETE /api/v1/clients/{id}
pub async fn delete_client<U, C, S, O, I>(
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

    match state.client_service.delete(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/clients/{id}/styles
///
/// Lists the styles linked to a client, in link order.
pub async fn list_client_styles<U, C, S, O, I>(
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

    match state.client_service.get(id).await {
        Ok(detail) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "results": detail.styles.len(),
            "data": { "styles": detail.styles },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for POST /api/v1/clients/{id}/styles
///
/// Links the style named in the body to a client.
///
/// # Errors
/// - 404 Not Found: unknown client or style
/// - 409 Conflict: style already linked to this client
pub async fn link_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<String>,
    request: web::Json<LinkStyleRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let (client_id, style_id) =
        match parse_id(&path).and_then(|c| Ok((c, parse_id(&request.style_id)?))) {
            Ok(ids) => ids,
            Err(error) => return handle_domain_error(error, state.environment),
        };

    match state.client_service.link_style(client_id, style_id).await {
        Ok(detail) => HttpResponse::Ok().json(client_with_styles_body(&detail)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for DELETE /api/v1/clients/{id}/styles/{style_id}
///
/// Removes a style link; unlinking a style that is not linked is a no-op.
pub async fn unlink_style<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let (client_id, style_id) = match parse_id(&path.0).and_then(|c| Ok((c, parse_id(&path.1)?))) {
        Ok(ids) => ids,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    match state.client_service.unlink_style(client_id, style_id).await {
        Ok(detail) => HttpResponse::Ok().json(client_with_styles_body(&detail)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

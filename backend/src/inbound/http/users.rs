//! Users API handlers.
//!
//! ```text
//! POST   /users       {"name":"Ana","email":"ana@x.com"}  -> 201 text
//! GET    /users                                          -> 200 JSON array
//! GET    /users/{id}                                     -> 200 JSON object
//! PUT    /users/{id}  {"name":"Ana","email":"ana@x.com"}  -> 204
//! DELETE /users/{id}                                     -> 204
//! ```
//!
//! Every failure is a `500` with a fixed plain-text message; see
//! [`crate::inbound::http::error`].

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{decode_user_details, encode_json, parse_user_id, read_body};

/// Register the five user routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// Create a user from a JSON body and report its assigned id.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload).await?;
    let details = decode_user_details(&body)?;
    let id = state.users_command.create_user(details).await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(format!("Successfully created user {id}")))
}

/// List every stored user.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    let body = encode_json(&users, "Failed to convert users to JSON!")?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Fetch one user; an unknown id yields the zero-valued user.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users.find_user(id).await?;
    let body = encode_json(&user, "Failed to convert user to JSON!")?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Replace a user's name and email. Unknown ids are a silent no-op.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let body = read_body(payload).await?;
    let details = decode_user_details(&body)?;
    state.users_command.update_user(id, details).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Permanently delete a user. Unknown ids are a silent no-op.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;

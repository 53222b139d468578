//! Auth endpoints: login, register, admin check.
//!
//! Every request is structurally validated before the service is invoked.
//! Client-correctable conditions get their own status (401/404/409); anything
//! internal stays an opaque 500 with the cause only in the server log.

pub mod types;
pub mod validate;

use crate::auth::{AuthError, AuthService};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::error;

use self::types::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use self::validate::{validate_is_admin, validate_login, validate_register};

fn error_response(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        AuthError::AppNotFound => (StatusCode::NOT_FOUND, err.to_string()),
        AuthError::UserAlreadyExists => (StatusCode::CONFLICT, err.to_string()),
        AuthError::Internal(cause) => {
            error!("request failed: {cause:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Missing or empty request field", body = String),
        (status = 401, description = "Invalid credentials", body = String),
        (status = 404, description = "Unknown app id", body = String),
        (status = 500, description = "Internal error", body = String),
    ),
    tag = "auth"
)]
pub async fn login(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if let Err(message) = validate_login(&request) {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match service
        .login(&request.email, &request.password, request.app_id)
        .await
    {
        Ok(token) => (StatusCode::OK, Json(LoginResponse { token })).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses (
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or empty request field", body = String),
        (status = 409, description = "Email already registered", body = String),
        (status = 500, description = "Internal error", body = String),
    ),
    tag = "auth"
)]
pub async fn register(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let request: RegisterRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if let Err(message) = validate_register(&request) {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match service.register(&request.email, &request.password).await {
        Ok(user_id) => (StatusCode::OK, Json(RegisterResponse { user_id })).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/is-admin",
    request_body = IsAdminRequest,
    responses (
        (status = 200, description = "Admin flag for the user", body = IsAdminResponse),
        (status = 400, description = "Missing user id", body = String),
        (status = 401, description = "Unknown user id", body = String),
        (status = 500, description = "Internal error", body = String),
    ),
    tag = "auth"
)]
pub async fn is_admin(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<IsAdminRequest>>,
) -> Response {
    let request: IsAdminRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if let Err(message) = validate_is_admin(&request) {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match service.is_admin(request.user_id).await {
        Ok(is_admin) => (StatusCode::OK, Json(IsAdminResponse { is_admin })).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

//! Registration and login handlers.

use actix_web::{HttpResponse, web};

use minigram_core::DomainError;
use minigram_core::domain::{Credentials, RegisterUser, User};
use minigram_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        created_at: user.created_at,
    }
}

/// POST /v1/users/register
pub async fn register(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first and last name are required".to_string(),
        ));
    }
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let (user, token) = state
        .auth
        .register(RegisterUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            username: req.username,
            password: req.password,
        })
        .await
        .map_err(|err| {
            if let DomainError::Internal(msg) = &err {
                tracing::error!(request_id = %request_id.as_str(), error = %msg, "register failed");
            }
            AppError::from(err)
        })?;

    Ok(HttpResponse::Created().json(AuthResponse {
        user: user_response(&user),
        token,
    }))
}

/// POST /v1/users/login
pub async fn login(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let (user, token) = state
        .auth
        .login(Credentials {
            email: req.email,
            password: req.password,
        })
        .await
        .map_err(|err| {
            if let DomainError::Internal(msg) = &err {
                tracing::error!(request_id = %request_id.as_str(), error = %msg, "login failed");
            }
            AppError::from(err)
        })?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: user_response(&user),
        token,
    }))
}

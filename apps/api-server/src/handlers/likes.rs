//! Like handlers.

use actix_web::{HttpResponse, web};

use minigram_core::DomainError;
use minigram_shared::dto::{CreateLikeRequest, DeletedResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /v1/likes
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateLikeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // A like against a missing post is a caller mistake, not a 404
    let like = state
        .likes
        .create(identity.user_id, req.post_id)
        .await
        .map_err(|err| match err {
            DomainError::NotFound { entity: "post" } => {
                AppError::BadRequest("post not found".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(like))
}

/// GET /v1/likes/{id}
pub async fn detail(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let like = state.likes.detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(like))
}

/// DELETE /v1/likes/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.likes.delete(id, identity.user_id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::new(id)))
}

//! Post handlers.

use actix_web::{HttpResponse, web};

use minigram_core::domain::CreatePost;
use minigram_shared::dto::{CreatePostRequest, DeletedResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /v1/posts
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(
            identity.user_id,
            CreatePost {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /v1/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /v1/posts/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let detail = state.posts.detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// DELETE /v1/posts/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id, identity.user_id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::new(id)))
}

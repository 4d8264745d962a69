//! Activity feed handler.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /v1/activities
pub async fn list_mine(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let activities = state.activities.list_mine(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(activities))
}

//! HTTP handlers and route configuration.

mod activities;
mod health;
mod likes;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Liveness probe outside the versioned prefix
    cfg.route("/health", web::get().to(health::health_check));

    cfg.service(
        web::scope("/v1")
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::list))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/likes")
                    .route("", web::post().to(likes::create))
                    .route("/{id}", web::get().to(likes::detail))
                    .route("/{id}", web::delete().to(likes::delete)),
            )
            .route("/activities", web::get().to(activities::list_mine)),
    );
}

use std::path::Path;

use actix_files::Files;
use actix_web::dev::fn_service;
use actix_web::web;

use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.service(
        web::scope("/api")
            .route("/chat", web::post().to(handlers::chat))
            .default_service(web::to(handlers::api_not_found)),
    )
    .route("/chat", web::post().to(handlers::chat))
    .route("/health", web::get().to(handlers::health_check))
    .route("/", web::get().to(handlers::index))
    .service(Files::new("/", static_dir).default_handler(fn_service(handlers::not_found)));
}

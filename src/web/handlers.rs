use actix_files::NamedFile;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use uuid::Uuid;

use crate::persona;
use crate::web::error::AppError;
use crate::web::models::{ChatRequest, ChatResponse, HealthResponse};
use crate::AppState;

pub const EMPTY_MESSAGE_REPLY: &str = "قول شي يا وليدي 😊";

fn reply(text: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(ChatResponse { reply: text.into() })
}

// Index page handler
pub async fn index(data: web::Data<AppState>) -> Result<NamedFile, AppError> {
    let path = data.config.static_dir.join("index.html");
    Ok(NamedFile::open_async(path).await?)
}

// Fallback for the static file service
pub async fn not_found(req: ServiceRequest) -> Result<ServiceResponse, actix_web::Error> {
    let (req, _) = req.into_parts();
    let err = AppError::NotFound(req.path().to_string());
    Ok(ServiceResponse::from_err(err, req))
}

// Fallback for unknown paths under /api
pub async fn api_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(req.path().to_string()))
}

// Health check endpoint
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        models: data.model.models().to_vec(),
        has_key: data.config.has_key(),
    })
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    let req = ChatRequest::from_body(&body?);
    if req.message.is_empty() {
        return Ok(reply(EMPTY_MESSAGE_REPLY));
    }

    let request_id = Uuid::new_v4();
    info!(
        "[{}] Chat request: {} chars, {} history entries",
        request_id,
        req.message.chars().count(),
        req.history.len()
    );

    if let Some(canned) = persona::classify(&req.message) {
        info!("[{}] Answered by canned rules", request_id);
        return Ok(reply(canned));
    }

    let answer = data.model.resolve(&req.message, &req.history).await;
    info!("[{}] Reply ready: {} chars", request_id, answer.chars().count());
    Ok(reply(answer))
}

use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::web::models::ErrorResponse;

const SERVER_FAULT: &str = "خطب بالخادم";

/// Anything that escapes a handler. Rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no such file: {0}")]
    NotFound(String),

    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error response produced by actix itself, e.g. an unmatched
    /// route or a method the resource does not accept.
    #[error("{}", .0.canonical_reason().unwrap_or("unexpected status"))]
    Status(StatusCode),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::Request { .. } => "RequestError",
            AppError::Io(_) => "IoError",
            AppError::Status(_) => "HttpError",
        }
    }
}

impl From<actix_web::Error> for AppError {
    fn from(err: actix_web::Error) -> Self {
        AppError::Request {
            status: err.as_response_error().status_code(),
            message: err.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Request { status, .. } => *status,
            AppError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Status(status) => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: format!("{}: {}: {}", SERVER_FAULT, self.kind(), self),
        })
    }
}

/// Rewrites non-JSON error responses into the `{"error": ...}` shape.
pub fn json_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_json_error)
}

fn render_json_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    // AppError responses already carry the right body.
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let (req, _) = res.into_parts();
    let response = AppError::Status(status).error_response();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

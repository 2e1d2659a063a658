//! Application factory
//!
//! Builds the actix-web `App` around an already wired `AppState`, so the
//! binary and the integration tests share one route table.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::JsonPayloadError,
    http::StatusCode,
    web, App, HttpRequest, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::routes::account::{
    login::login,
    profile::{get_profile, update_profile},
    register::register,
    AppState,
};
use crate::routes::health::health_check;
use us_core::repositories::AccountStore;
use us_shared::error_codes;

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: AccountStore + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(register::<S>))
        .route("/login", web::post().to(login::<S>))
        .route("/profile", web::get().to(get_profile::<S>))
        .route("/profile", web::put().to(update_profile::<S>))
        .default_service(web::route().to(not_found))
}

/// Malformed or oversized JSON bodies answer 400 `invalid_request`
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(reason = %err, "Rejected request body");

    let response = ErrorResponse::new(error_codes::INVALID_REQUEST, err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}

use actix_web::{web, HttpResponse};

use super::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::handle_domain_error;
use us_core::repositories::AccountStore;

/// Handler for POST /login
///
/// Answers `{"id": ..., "token": ...}`. Unknown phone numbers and wrong
/// passwords both answer 400 `authentication_failed`.
pub async fn login<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: AccountStore + 'static,
{
    match state
        .auth_service
        .login(&request.phone_number, &request.password)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(LoginResponse {
            id: result.id,
            token: result.token,
        }),
        Err(e) => handle_domain_error(e),
    }
}

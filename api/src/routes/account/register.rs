use actix_web::{web, HttpResponse};

use super::AppState;
use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::handle_domain_error;
use us_core::repositories::AccountStore;

/// Handler for POST /register
///
/// # Request Body
///
/// ```json
/// {
///     "full_name": "Jane Doe",
///     "phone_number": "+628123456789",
///     "password": "Secr3t!"
/// }
/// ```
///
/// # Response
///
/// `200 OK` with `{"id": 1234567890}`; validation and store errors
/// answer 400.
pub async fn register<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    S: AccountStore + 'static,
{
    let request = request.into_inner();

    match state
        .auth_service
        .register(&request.full_name, &request.phone_number, &request.password)
        .await
    {
        Ok(id) => HttpResponse::Ok().json(RegisterResponse { id }),
        Err(e) => handle_domain_error(e),
    }
}

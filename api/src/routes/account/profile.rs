use actix_web::{web, HttpResponse};

use super::AppState;
use crate::dto::auth::{ProfileResponse, UpdateProfileRequest, UpdateProfileResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthorizationHeader;
use us_core::repositories::AccountStore;

const UPDATE_SUCCESS_MESSAGE: &str = "Update profile success";

/// Handler for GET /profile
pub async fn get_profile<S>(
    state: web::Data<AppState<S>>,
    authorization: AuthorizationHeader,
) -> HttpResponse
where
    S: AccountStore + 'static,
{
    match state.auth_service.get_profile(authorization.as_str()).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PUT /profile
///
/// Both fields are overwritten. The JSON body is parsed first, so a
/// malformed body answers 400 `invalid_request` even without a token; for a
/// well-formed body a missing or invalid token answers 403 before the
/// field checks run.
pub async fn update_profile<S>(
    state: web::Data<AppState<S>>,
    authorization: AuthorizationHeader,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    S: AccountStore + 'static,
{
    match state
        .auth_service
        .update_profile(
            authorization.as_str(),
            &request.full_name,
            &request.phone_number,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(UpdateProfileResponse {
            message: UPDATE_SUCCESS_MESSAGE.to_string(),
        }),
        Err(e) => handle_domain_error(e),
    }
}

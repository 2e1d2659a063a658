//! Authorization header extraction for protected endpoints.
//!
//! Token verification happens in the authentication service; this
//! extractor only hands the raw header value over. A missing or
//! non-ASCII header becomes an empty string, which the service rejects
//! as forbidden.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Raw value of the `Authorization` request header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationHeader(pub String);

impl AuthorizationHeader {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for AuthorizationHeader {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        ready(Ok(AuthorizationHeader(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_header_value() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();

        let header = AuthorizationHeader::extract(&req).await.unwrap();
        assert_eq!(header.as_str(), "Bearer abc.def.ghi");
    }

    #[actix_web::test]
    async fn test_missing_header_is_empty() {
        let req = TestRequest::default().to_http_request();

        let header = AuthorizationHeader::extract(&req).await.unwrap();
        assert_eq!(header, AuthorizationHeader::default());
    }
}

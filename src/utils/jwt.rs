use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web::dev::ServiceRequest;
use actix_web::Error;

use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: usize,
}

/// Reads the claims of a session token without checking its signature; the
/// upstream API holds the key and stays the authority on validity. Fails with
/// `ExpiredSignature` once `exp` has passed.
pub fn read_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
}

/// True only when the token is a JWT whose `exp` is in the past. Opaque or
/// undecodable tokens are left for the upstream API to judge.
pub fn is_expired(token: &str) -> bool {
    match read_claims(token) {
        Ok(_) => false,
        Err(err) => matches!(err.kind(), ErrorKind::ExpiredSignature),
    }
}

/// Validator function for the `HttpAuthentication::bearer` middleware.
/// Rejects requests whose token has already expired so no upstream call is made.
pub async fn validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    if is_expired(credentials.token()) {
        return Err((AppError::Unauthorized("Session expired".to_string()).into(), req));
    }
    Ok(req)
}

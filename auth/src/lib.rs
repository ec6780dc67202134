#[macro_use]
extern crate log;

use actix_identity::{Identity, IdentityPolicy, IdentityService};
use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    error,
    http::header,
};
use chrono::{Duration, Utc};
use futures_util::future::{ok, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use errors::{Error, INVALID_CREDENTIALS};

mod password;

pub use password::{hash_password, verify_password};

/// How long an issued access token stays valid.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrivateClaim {
    /// Username of the authenticated user.
    pub sub: String,
    exp: i64,
}

impl PrivateClaim {
    pub fn new(sub: String) -> Self {
        PrivateClaim {
            sub,
            exp: (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        }
    }

    pub fn exp(&self) -> i64 {
        self.exp
    }

    pub fn set_exp(&mut self, exp: i64) {
        self.exp = exp;
    }
}

/// Signing material for access tokens, built once at startup.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

pub struct AuthHeaderIdentityPolicy;

impl AuthHeaderIdentityPolicy {
    fn new() -> Self {
        AuthHeaderIdentityPolicy {}
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<String> {
    let mut parts = value.trim().splitn(2, ' ');
    let scheme = parts.next()?;
    let token = parts.next()?.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

impl IdentityPolicy for AuthHeaderIdentityPolicy {
    type Future = Ready<Result<Option<String>, error::Error>>;
    type ResponseFuture = Ready<Result<(), error::Error>>;

    fn from_request(&self, request: &mut ServiceRequest) -> Self::Future {
        let token = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token);

        ok(token)
    }

    fn to_response<B>(
        &self,
        _identity: Option<String>,
        _changed: bool,
        _response: &mut ServiceResponse<B>,
    ) -> Self::ResponseFuture {
        ok(())
    }
}

pub fn create_jwt(keys: &JwtKeys, private_claim: &PrivateClaim) -> Result<String, Error> {
    encode(&Header::new(Algorithm::HS256), private_claim, &keys.encoding)
        .map_err(|e| Error::CannotEncodeJwtToken(e.to_string()))
}

pub fn decode_jwt(keys: &JwtKeys, token: &str) -> Result<PrivateClaim, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<PrivateClaim>(token, &keys.decoding, &validation)
        .map(|data| data.claims)
        .map_err(|e| Error::CannotDecodeJwtToken(e.to_string()))
}

pub fn get_identity_service() -> IdentityService<AuthHeaderIdentityPolicy> {
    IdentityService::new(AuthHeaderIdentityPolicy::new())
}

/// Validates the bearer token attached to the request. Every failure is reported
/// the same way so the client knows to log in again.
pub fn get_claim_from_identity(id: &Identity, keys: &JwtKeys) -> Result<PrivateClaim, Error> {
    let token = id
        .identity()
        .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    decode_jwt(keys, &token).map_err(|err| {
        debug!("Rejected token - {}", err);
        Error::Unauthorized(INVALID_CREDENTIALS.to_string())
    })
}

#[macro_use]
extern crate log;

use actix_web::{
    error::{BlockingError, ResponseError},
    http::{header, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use diesel::result::{DatabaseErrorKind, Error as DBError};
use r2d2::Error as PoolError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, PartialEq)]
pub enum Error {
    BadRequest(String),
    BlockingError(String),
    CannotDecodeJwtToken(String),
    CannotEncodeJwtToken(String),
    Conflict(String),
    Forbidden(String),
    InternalServerError(String),
    NotFound(String),
    PasswordHashError(String),
    PoolError(String),
    Unauthorized(String),
    UnprocessableEntity(String),
    #[display(fmt = "Validation failed")]
    ValidationError(Vec<String>),
}

/// Message used whenever a bearer token fails validation for any reason.
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

// User-friendly error messages
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) | Error::CannotDecodeJwtToken(_) => StatusCode::UNAUTHORIZED,
            Error::UnprocessableEntity(_) | Error::ValidationError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Error::ValidationError(ref validation_errors) => {
                HttpResponse::UnprocessableEntity()
                    .json(ErrorResponse::from(validation_errors.to_vec()))
            }
            Error::UnprocessableEntity(message) => {
                HttpResponse::UnprocessableEntity().json(ErrorResponse::from(message))
            }
            Error::BadRequest(message) => {
                HttpResponse::BadRequest().json(ErrorResponse::from(message))
            }
            Error::Conflict(message) => {
                HttpResponse::Conflict().json(ErrorResponse::from(message))
            }
            Error::Forbidden(message) => {
                HttpResponse::Forbidden().json(ErrorResponse::from(message))
            }
            Error::NotFound(message) => {
                HttpResponse::NotFound().json(ErrorResponse::from(message))
            }
            Error::Unauthorized(message) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::from(message)),
            Error::CannotDecodeJwtToken(_) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(ErrorResponse::from(INVALID_CREDENTIALS)),
            _ => {
                error!("Internal error - {}", self);
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::from("Internal server error"))
            }
        }
    }
}

impl From<&str> for ErrorResponse {
    fn from(error: &str) -> Self {
        ErrorResponse {
            errors: vec![error.into()],
        }
    }
}

impl From<&String> for ErrorResponse {
    fn from(error: &String) -> Self {
        ErrorResponse {
            errors: vec![error.into()],
        }
    }
}

impl From<Vec<String>> for ErrorResponse {
    fn from(error: Vec<String>) -> Self {
        ErrorResponse { errors: error }
    }
}

// Convert DBErrors to our Error type
impl From<DBError> for Error {
    fn from(error: DBError) -> Error {
        match error {
            DBError::DatabaseError(kind, info) => {
                let message = info.details().unwrap_or_else(|| info.message()).to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => Error::Conflict(message),
                    DatabaseErrorKind::ForeignKeyViolation => Error::BadRequest(message),
                    _ => Error::InternalServerError(message),
                }
            }
            DBError::NotFound => Error::NotFound("Record not found".into()),
            _ => Error::InternalServerError(error.to_string()),
        }
    }
}

// Convert PoolError to our Error type
impl From<PoolError> for Error {
    fn from(error: PoolError) -> Error {
        Error::PoolError(error.to_string())
    }
}

impl From<BlockingError> for Error {
    fn from(error: BlockingError) -> Error {
        Error::BlockingError(error.to_string())
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bcrypt::BcryptError;
use thiserror::Error;
use tracing::error;

use crate::{domain::ErrorResponse, validation::ValidationError};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(sqlx::Error),

    #[error("Query builder error: {0}")]
    QueryError(#[from] sea_query::error::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Ação não autorizada")]
    Forbidden,

    #[error("Este email já está cadastrado.")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("O autorId fornecido não corresponde a um usuário existente.")]
    ForeignKeyViolation,

    #[error("Hashing error: {0}")]
    HashingError(#[from] BcryptError),

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => return AppError::ForeignKeyViolation,
                Some(UNIQUE_VIOLATION) => return AppError::EmailAlreadyExists,
                _ => {}
            }
        }
        AppError::SqlxError(err)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::ForeignKeyViolation => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::SqlxError(_)
            | AppError::QueryError(_)
            | AppError::HashingError(_)
            | AppError::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller. Internal failures are reduced to a
    /// generic text; their details only go to the logs.
    pub fn client_message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "Erro interno do servidor".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        ErrorResponse::new(err.client_message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

//! Business rules applied to request bodies before anything is persisted.
//!
//! Every validator is a pure function: it inspects the candidate record, stops
//! at the first rule that does not hold and reports it as a [`ValidationError`].
//! Inputs are never modified; lengths are measured on the trimmed value in
//! Unicode scalar values, and callers trim again before writing to storage.

mod post;
mod user;

use thiserror::Error;

pub use self::post::{
    AUTOR_MAX_LEN, CONTEUDO_MAX_LEN, CONTEUDO_MIN_LEN, TITULO_MAX_LEN, validate_create_post,
    validate_update_post,
};
pub use self::user::{
    NAME_MAX_LEN, PASSWORD_MIN_LEN, validate_change_password, validate_create_user,
    validate_update_user,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Post(String),

    #[error("{0}")]
    User(String),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Post(_) => "PostValidationError",
            ValidationError::User(_) => "UserValidationError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::Post(message) | ValidationError::User(message) => message,
        }
    }
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use shared::utils::AppError;

const INVALID_BODY: &str = "Corpo da requisição inválido";
const INVALID_QUERY: &str = "Parâmetros de consulta inválidos";
const INVALID_PATH: &str = "Parâmetro de rota inválido";

/// JSON body checked with its `validator` rules; the first failing rule is
/// reported as a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| AppError::BadRequest(first_message(&errors)))?;
        Ok(SimpleValidatedJson(value))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| INVALID_BODY.to_string())
}

/// JSON body whose decoding failures use the API error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(AppError::BadRequest(INVALID_BODY.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                debug!("Rejected query string: {}", rejection.body_text());
                Err(AppError::BadRequest(INVALID_QUERY.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => {
                debug!("Rejected path parameter: {}", rejection.body_text());
                Err(AppError::BadRequest(INVALID_PATH.to_string()))
            }
        }
    }
}

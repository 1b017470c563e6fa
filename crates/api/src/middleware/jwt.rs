use axum::{
    body::Body,
    extract::{Extension, State},
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::warn;

use shared::{
    abstract_trait::AuthServiceTrait,
    policy::{AuthUser, can_manage_users},
    state::AppState,
    utils::AppError,
};

/// Resolves the caller from the `token` cookie or a bearer header and makes
/// it available to handlers as an [`AuthUser`] extension.
pub async fn auth(
    cookie_jar: CookieJar,
    State(data): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_owned())
        })
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        return Err(AppError::Unauthorized(
            "Usuário não autenticado.".to_string(),
        ));
    };

    let user = data
        .di_container
        .auth_service
        .authenticate(&token)
        .await
        .map_err(|err| match err {
            AppError::Unauthorized(_) | AppError::TokenError(_) => {
                AppError::Unauthorized("Token inválido ou expirado.".to_string())
            }
            other => other,
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Must run after [`auth`]; lets only ADMIN and TEACHER through.
pub async fn require_admin_or_teacher(
    Extension(user): Extension<AuthUser>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    if !can_manage_users(&user) {
        warn!("User {} ({}) denied a staff-only route", user.id, user.app_role);
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}

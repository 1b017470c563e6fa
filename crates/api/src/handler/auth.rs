use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

use crate::middleware::{jwt, validate::SimpleValidatedJson};
use shared::{
    abstract_trait::AuthServiceTrait,
    domain::{ApiResponse, ErrorResponse, LoginRequest, MessageResponse, TokenResponse, UserResponse},
    policy::AuthUser,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Malformed credentials", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_user_handler(
    State(data): State<Arc<AppState>>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.auth_service.login_user(&body).await?;

    let cookie = Cookie::build(("token", response.data.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((StatusCode::OK, jar.add(cookie), Json(response)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(("token", "")).path("/"));
    (
        StatusCode::OK,
        jar,
        Json(MessageResponse::new("Logout realizado com sucesso")),
    )
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn get_me_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.auth_service.get_me(&user).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/auth/login", post(login_user_handler))
        .route("/auth/logout", post(logout_handler))
        .with_state(app_state.clone());

    let private_routes = OpenApiRouter::new()
        .route("/auth/me", get(get_me_handler))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state.clone());

    OpenApiRouter::new()
        .merge(public_routes)
        .merge(private_routes)
}

mod auth;
mod posts;
mod user;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::{
    Modify, OpenApi, ToSchema,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use shared::state::AppState;

pub use self::auth::auth_routes;
pub use self::posts::post_routes;
pub use self::user::user_routes;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::login_user_handler,
        auth::logout_handler,
        auth::get_me_handler,
        posts::get_posts,
        posts::search_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        user::get_users,
        user::search_users,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user,
        user::change_password,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness probe."),
        (name = "auth", description = "Authentication endpoints."),
        (name = "posts", description = "Post management endpoints."),
        (name = "users", description = "User management endpoints.")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        message: format!(
            "Health Check OK, Backend is running on port {}!",
            state.port
        ),
    })
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        error!("Failed to encode metrics: {}", e);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn router(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let mut router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone());

        router = router.merge(auth_routes(shared_state.clone()));
        router = router.merge(post_routes(shared_state.clone()));
        router = router.merge(user_routes(shared_state.clone()));

        let router = router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let (router, api) = router.split_for_parts();

        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> anyhow::Result<()> {
        let router = Self::router(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Server running on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

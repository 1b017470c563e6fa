use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

use crate::middleware::{
    jwt,
    validate::{JsonBody, PathParam, QueryParams},
};
use shared::{
    abstract_trait::PostsServiceTrait,
    domain::{
        ApiResponse, ApiResponsePagination, CreatePostRequest, ErrorResponse, FindAllPostRequest,
        PostResponse, SearchPostRequest, UpdatePostRequest,
    },
    policy::AuthUser,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/posts",
    params(FindAllPostRequest),
    responses(
        (status = 200, description = "Paginated posts, newest first", body = ApiResponsePagination<Vec<PostResponse>>),
        (status = 400, description = "Invalid query string", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_posts(
    State(data): State<Arc<AppState>>,
    QueryParams(params): QueryParams<FindAllPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.post_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/posts/search",
    params(SearchPostRequest),
    responses(
        (status = 200, description = "Posts whose title or content match", body = ApiResponsePagination<Vec<PostResponse>>),
        (status = 400, description = "Invalid query string", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn search_posts(
    State(data): State<Arc<AppState>>,
    QueryParams(params): QueryParams<SearchPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.post_service.search(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post", body = ApiResponse<PostResponse>),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(data): State<Arc<AppState>>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.post_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn create_post(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.post_service.create(&user, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn update_post(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
    JsonBody(body): JsonBody<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .post_service
        .update(&user, id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn delete_post(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    data.di_container.post_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn post_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/posts", get(get_posts))
        .route("/posts/search", get(search_posts))
        .route("/posts/{id}", get(get_post))
        .with_state(app_state.clone());

    let protected_routes = OpenApiRouter::new()
        .route("/posts", post(create_post))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state.clone());

    OpenApiRouter::new()
        .merge(public_routes)
        .merge(protected_routes)
}

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
use uuid::Uuid;

use crate::middleware::{
    jwt,
    validate::{JsonBody, PathParam, QueryParams},
};
use shared::{
    abstract_trait::UserServiceTrait,
    domain::{
        ApiResponse, ApiResponsePagination, ChangePasswordRequest, CreateUserRequest,
        ErrorResponse, FindAllUserRequest, MessageResponse, SearchUserRequest, UpdateUserRequest,
        UserResponse,
    },
    policy::AuthUser,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/users",
    params(FindAllUserRequest),
    responses(
        (status = 200, description = "Paginated users, newest first", body = ApiResponsePagination<Vec<UserResponse>>)
    ),
    tag = "users"
)]
pub async fn get_users(
    State(data): State<Arc<AppState>>,
    QueryParams(params): QueryParams<FindAllUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.user_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/users/search",
    params(SearchUserRequest),
    responses(
        (status = 200, description = "Users whose name or email match", body = ApiResponsePagination<Vec<UserResponse>>)
    ),
    tag = "users"
)]
pub async fn search_users(
    State(data): State<Arc<AppState>>,
    QueryParams(params): QueryParams<SearchUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.user_service.search(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with their posts", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(data): State<Arc<AppState>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.user_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Caller is a student", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn create_user(
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.user_service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not allowed to modify this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn update_user(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .user_service
        .update(&user, id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Not allowed to delete this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.user_service.delete(&user, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/users/{id}/change-password",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid or wrong password", body = ErrorResponse),
        (status = 403, description = "Not allowed to change this password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn change_password(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .user_service
        .change_password(&user, id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/users", get(get_users))
        .route("/users/search", get(search_users))
        .route("/users/{id}", get(get_user))
        .with_state(app_state.clone());

    let staff_routes = OpenApiRouter::new()
        .route("/users", post(create_user))
        .route_layer(middleware::from_fn(jwt::require_admin_or_teacher))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state.clone());

    let protected_routes = OpenApiRouter::new()
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/users/{id}/change-password", post(change_password))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state.clone());

    OpenApiRouter::new()
        .merge(public_routes)
        .merge(staff_routes)
        .merge(protected_routes)
}

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        ApiResponse, ApiResponsePagination, ChangePasswordRequest, CreateUserRequest,
        FindAllUserRequest, MessageResponse, SearchUserRequest, UpdateUserRequest, UserResponse,
    },
    model::{
        posts::PostSummary,
        user::{NewUser, User, UserChanges, UserQuery},
    },
    policy::AuthUser,
    utils::AppError,
};

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;
pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_all(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError>;
    async fn search(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email_exists(&self, email: &str) -> Result<bool, AppError>;
    async fn create(&self, input: &NewUser) -> Result<User, AppError>;
    async fn update(&self, id: Uuid, input: &UserChanges) -> Result<User, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
    /// Posts written by any of the given users, newest first.
    async fn find_posts(&self, user_ids: &[Uuid]) -> Result<Vec<PostSummary>, AppError>;
}

#[async_trait]
pub trait UserServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllUserRequest,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, AppError>;
    async fn search(
        &self,
        req: &SearchUserRequest,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError>;
    async fn create(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError>;
    async fn update(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError>;
    async fn delete(&self, actor: &AuthUser, id: Uuid) -> Result<MessageResponse, AppError>;
    async fn change_password(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &ChangePasswordRequest,
    ) -> Result<MessageResponse, AppError>;
}

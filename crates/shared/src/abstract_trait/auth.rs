use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    config::AdminBootstrap,
    domain::{ApiResponse, LoginRequest, TokenResponse, UserResponse},
    policy::AuthUser,
    utils::AppError,
};

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn login_user(&self, input: &LoginRequest) -> Result<ApiResponse<TokenResponse>, AppError>;
    /// Resolves a bearer token to the user it was issued for.
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError>;
    async fn get_me(&self, actor: &AuthUser) -> Result<ApiResponse<UserResponse>, AppError>;
    /// Creates the configured administrator unless that email is taken.
    /// Returns whether an account was created.
    async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<bool, AppError>;
}

use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::{
    abstract_trait::{AuthServiceTrait, DynUserRepository},
    config::{AdminBootstrap, Hashing, JwtConfig},
    domain::{ApiResponse, LoginRequest, TokenResponse, UserResponse},
    model::user::{AppRole, NewUser, Role},
    policy::AuthUser,
    utils::{AppError, Method, Metrics, ServiceTracer},
};

#[derive(Clone)]
pub struct AuthService {
    repository: DynUserRepository,
    hashing: Hashing,
    jwt_config: JwtConfig,
    tracer: ServiceTracer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("repository", &"DynUserRepository")
            .field("hashing", &"Hashing")
            .field("jwt_config", &"JwtConfig")
            .finish()
    }
}

impl AuthService {
    pub fn new(
        repository: DynUserRepository,
        hashing: Hashing,
        jwt_config: JwtConfig,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            hashing,
            jwt_config,
            tracer: ServiceTracer::new("auth-service", metrics),
        }
    }

    async fn issue_token(&self, input: &LoginRequest) -> Result<TokenResponse, AppError> {
        let user = self
            .repository
            .find_by_email(input.email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        self.hashing
            .compare_password(&user.password, &input.password)
            .await?;

        let token = self.jwt_config.generate_token(user.id)?;

        Ok(TokenResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError> {
        let user_id = self.jwt_config.verify_token(token)?;

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Token inválido ou expirado.".to_string()))?;

        Ok(AuthUser::from(&user))
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login_user(&self, input: &LoginRequest) -> Result<ApiResponse<TokenResponse>, AppError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "LoginUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", input.email.clone()),
            ],
        );

        match self.issue_token(input).await {
            Ok(response) => {
                info!("User {} logged in", response.user.id);
                self.tracer
                    .complete_success(&tracing_ctx, method, "Login successful")
                    .await;
                Ok(ApiResponse::with_message("Login realizado com sucesso", response))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &format!("Login failed: {err}"))
                    .await;
                Err(err)
            }
        }
    }

    async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        self.resolve(token).await
    }

    async fn get_me(&self, actor: &AuthUser) -> Result<ApiResponse<UserResponse>, AppError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", actor.id.to_string()),
            ],
        );

        let user = match self.repository.find_by_id(actor.id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "User not found")
                    .await;
                return Err(AppError::NotFound("Usuário não encontrado".to_string()));
            }
            Err(err) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &format!("Error finding user: {err}"))
                    .await;
                return Err(err);
            }
        };

        match self.repository.find_posts(&[user.id]).await {
            Ok(posts) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Current user retrieved")
                    .await;
                Ok(ApiResponse::ok(UserResponse::with_posts(user, posts)))
            }
            Err(err) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &format!("Error loading posts: {err}"))
                    .await;
                Err(err)
            }
        }
    }

    async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<bool, AppError> {
        if self.repository.find_by_email_exists(&admin.email).await? {
            info!("Administrator {} already registered", admin.email);
            return Ok(false);
        }

        let new_user = NewUser {
            id: Uuid::new_v4(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash: self.hashing.hash_password(&admin.password).await?,
            app_role: AppRole::Admin,
            role: Role::Admin,
        };

        let user = self.repository.create(&new_user).await?;
        info!("Administrator {} created", user.email);

        Ok(true)
    }
}

use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::trimmed;
use crate::{
    abstract_trait::{DynUserRepository, UserServiceTrait},
    config::Hashing,
    domain::{
        ApiResponse, ApiResponsePagination, ChangePasswordRequest, CreateUserRequest,
        FindAllUserRequest, MessageResponse, PageQuery, Pagination, SearchUserRequest,
        UpdateUserRequest, UserResponse,
    },
    model::{
        posts::PostSummary,
        user::{NewUser, User, UserChanges, UserQuery},
    },
    policy::{AuthUser, can_manage_users, can_modify},
    utils::{AppError, Method, Metrics, ServiceTracer},
    validation::{validate_change_password, validate_create_user, validate_update_user},
};

#[derive(Clone)]
pub struct UserService {
    repository: DynUserRepository,
    hashing: Hashing,
    tracer: ServiceTracer,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("repository", &"DynUserRepository")
            .field("hashing", &"Hashing")
            .finish()
    }
}

impl UserService {
    pub fn new(
        repository: DynUserRepository,
        hashing: Hashing,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            hashing,
            tracer: ServiceTracer::new("user-service", metrics),
        }
    }

    /// Attaches to every user the summaries of the posts they wrote.
    async fn with_posts(&self, users: Vec<User>) -> Result<Vec<UserResponse>, AppError> {
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut by_author: HashMap<Uuid, Vec<PostSummary>> = HashMap::new();

        for post in self.repository.find_posts(&ids).await? {
            by_author.entry(post.author_id).or_default().push(post);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let posts = by_author.remove(&user.id).unwrap_or_default();
                UserResponse::with_posts(user, posts)
            })
            .collect())
    }

    async fn paginate(
        &self,
        page: PageQuery,
        query: &UserQuery,
        search: bool,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, AppError> {
        let (users, total) = if search {
            self.repository.search(query).await?
        } else {
            self.repository.find_all(query).await?
        };

        Ok(ApiResponsePagination {
            success: true,
            data: self.with_posts(users).await?,
            pagination: Pagination::new(page, total),
        })
    }

    async fn existing(&self, id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))
    }

    async fn single(&self, user: User) -> Result<UserResponse, AppError> {
        let posts = self.repository.find_posts(&[user.id]).await?;
        Ok(UserResponse::with_posts(user, posts))
    }

    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserResponse, AppError> {
        validate_create_user(req)?;

        let email = trimmed(&req.email).unwrap_or_default();
        if self.repository.find_by_email_exists(&email).await? {
            return Err(AppError::EmailAlreadyExists);
        }

        let password = req.password.as_deref().unwrap_or_default();
        let password_hash = self.hashing.hash_password(password).await?;

        let new_user = NewUser {
            id: Uuid::new_v4(),
            name: trimmed(&req.name).unwrap_or_default(),
            email,
            password_hash,
            app_role: req.app_role.unwrap_or_default(),
            role: req.role.unwrap_or_default(),
        };

        let user = self.repository.create(&new_user).await?;
        Ok(UserResponse::from(user))
    }

    async fn update_user(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user = self.existing(id).await?;

        if !can_modify(actor, user.id) {
            return Err(AppError::Forbidden);
        }

        if (req.role.is_some() || req.app_role.is_some()) && !can_manage_users(actor) {
            warn!("User {} tried to change roles of {}", actor.id, id);
            return Err(AppError::Forbidden);
        }

        validate_update_user(req)?;

        let email = trimmed(&req.email).filter(|e| !e.is_empty());
        if let Some(email) = &email {
            if *email != user.email && self.repository.find_by_email_exists(email).await? {
                return Err(AppError::EmailAlreadyExists);
            }
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => Some(self.hashing.hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: trimmed(&req.name),
            email,
            password_hash,
            app_role: req.app_role,
            role: req.role,
        };

        let updated = self.repository.update(id, &changes).await?;
        self.single(updated).await
    }

    async fn delete_user(&self, actor: &AuthUser, id: Uuid) -> Result<(), AppError> {
        let user = self.existing(id).await?;

        if !can_modify(actor, user.id) {
            return Err(AppError::Forbidden);
        }

        self.repository.delete(id).await
    }

    async fn apply_password_change(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_change_password(req)?;

        let user = self.existing(id).await?;

        if !can_modify(actor, user.id) {
            return Err(AppError::Forbidden);
        }

        if !actor.is_staff() {
            let old_password = req.old_password.as_deref().unwrap_or_default();
            match self
                .hashing
                .compare_password(&user.password, old_password)
                .await
            {
                Ok(()) => {}
                Err(AppError::InvalidCredentials) => {
                    return Err(AppError::BadRequest("Senha atual incorreta".to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        let new_password = req.new_password.as_deref().unwrap_or_default();
        let changes = UserChanges {
            password_hash: Some(self.hashing.hash_password(new_password).await?),
            ..Default::default()
        };

        self.repository.update(id, &changes).await?;
        Ok(())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_all(
        &self,
        req: &FindAllUserRequest,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, AppError> {
        let method = Method::Get;
        let page = req.page_query();

        let tracing_ctx = self.tracer.start(
            "FindAllUsers",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("page", page.page),
                KeyValue::new("limit", page.limit),
            ],
        );

        match self.paginate(page, &req.to_query(), false).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Users retrieved successfully")
                    .await;
                Ok(response)
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to retrieve users: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn search(
        &self,
        req: &SearchUserRequest,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, AppError> {
        let method = Method::Get;
        let page = req.page_query();
        let query = req.to_query();

        let tracing_ctx = self.tracer.start(
            "SearchUsers",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("page", page.page),
                KeyValue::new("limit", page.limit),
                KeyValue::new("search", query.search.clone().unwrap_or_default()),
            ],
        );

        match self.paginate(page, &query, true).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Users searched successfully")
                    .await;
                Ok(response)
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to search users: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "FindUserById",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = match self.existing(id).await {
            Ok(user) => self.single(user).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(user) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "User retrieved successfully")
                    .await;
                Ok(ApiResponse::ok(user))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to retrieve user {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn create(&self, req: &CreateUserRequest) -> Result<ApiResponse<UserResponse>, AppError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "CreateUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.email", req.email.clone().unwrap_or_default()),
            ],
        );

        match self.create_user(req).await {
            Ok(user) => {
                info!("User {} created", user.id);
                self.tracer
                    .complete_success(&tracing_ctx, method, "User created successfully")
                    .await;
                Ok(ApiResponse::with_message("Usuário criado com sucesso", user))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to create user: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn update(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "UpdateUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
                KeyValue::new("actor.id", actor.id.to_string()),
            ],
        );

        match self.update_user(actor, id, req).await {
            Ok(user) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "User updated successfully")
                    .await;
                Ok(ApiResponse::with_message(
                    "Usuário atualizado com sucesso",
                    user,
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to update user {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn delete(&self, actor: &AuthUser, id: Uuid) -> Result<MessageResponse, AppError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "DeleteUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
                KeyValue::new("actor.id", actor.id.to_string()),
            ],
        );

        match self.delete_user(actor, id).await {
            Ok(()) => {
                info!("User {} deleted by {}", id, actor.id);
                self.tracer
                    .complete_success(&tracing_ctx, method, "User deleted successfully")
                    .await;
                Ok(MessageResponse::new("Usuário deletado com sucesso"))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to delete user {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn change_password(
        &self,
        actor: &AuthUser,
        id: Uuid,
        req: &ChangePasswordRequest,
    ) -> Result<MessageResponse, AppError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "ChangePassword",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
                KeyValue::new("actor.id", actor.id.to_string()),
            ],
        );

        match self.apply_password_change(actor, id, req).await {
            Ok(()) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Password changed successfully")
                    .await;
                Ok(MessageResponse::new("Senha alterada com sucesso"))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to change password of {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }
}

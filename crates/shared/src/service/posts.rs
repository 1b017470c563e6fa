use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::trimmed;
use crate::{
    abstract_trait::{DynPostsRepository, PostsServiceTrait},
    domain::{
        ApiResponse, ApiResponsePagination, CreatePostRequest, FindAllPostRequest, PageQuery,
        Pagination, PostResponse, SearchPostRequest, UpdatePostRequest,
    },
    model::posts::{NewPost, Post, PostChanges, PostQuery},
    policy::{AuthUser, can_modify},
    utils::{AppError, Method, Metrics, ServiceTracer},
    validation::{validate_create_post, validate_update_post},
};

#[derive(Clone)]
pub struct PostService {
    repository: DynPostsRepository,
    tracer: ServiceTracer,
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService")
            .field("repository", &"DynPostsRepository")
            .finish()
    }
}

impl PostService {
    pub fn new(repository: DynPostsRepository, metrics: Arc<Mutex<Metrics>>) -> Self {
        Self {
            repository,
            tracer: ServiceTracer::new("post-service", metrics),
        }
    }

    async fn paginate(
        &self,
        page: PageQuery,
        query: &PostQuery,
        search: bool,
    ) -> Result<ApiResponsePagination<Vec<PostResponse>>, AppError> {
        let (posts, total) = if search {
            self.repository.search(query).await?
        } else {
            self.repository.find_all(query).await?
        };

        Ok(ApiResponsePagination {
            success: true,
            data: posts.into_iter().map(PostResponse::from).collect(),
            pagination: Pagination::new(page, total),
        })
    }

    async fn existing(&self, id: i32) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))
    }

    async fn create_post(
        &self,
        actor: &AuthUser,
        req: &CreatePostRequest,
    ) -> Result<Post, AppError> {
        validate_create_post(req)?;

        let new_post = NewPost {
            titulo: trimmed(&req.titulo).unwrap_or_default(),
            conteudo: trimmed(&req.conteudo).unwrap_or_default(),
            autor: trimmed(&req.autor).unwrap_or_else(|| actor.name.clone()),
            author_id: actor.id,
        };

        self.repository.create(&new_post).await
    }

    async fn update_post(
        &self,
        actor: &AuthUser,
        id: i32,
        req: &UpdatePostRequest,
    ) -> Result<Post, AppError> {
        let post = self.existing(id).await?;

        if !can_modify(actor, post.author_id) {
            return Err(AppError::Forbidden);
        }

        validate_update_post(req)?;

        let changes = PostChanges {
            titulo: trimmed(&req.titulo),
            conteudo: trimmed(&req.conteudo),
            autor: trimmed(&req.autor),
        };

        self.repository.update(id, &changes).await
    }

    async fn delete_post(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        let post = self.existing(id).await?;

        if !can_modify(actor, post.author_id) {
            return Err(AppError::Forbidden);
        }

        self.repository.delete(id).await
    }
}

#[async_trait]
impl PostsServiceTrait for PostService {
    async fn find_all(
        &self,
        req: &FindAllPostRequest,
    ) -> Result<ApiResponsePagination<Vec<PostResponse>>, AppError> {
        let method = Method::Get;
        let page = req.page_query();

        let tracing_ctx = self.tracer.start(
            "FindAllPosts",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("page", page.page),
                KeyValue::new("limit", page.limit),
            ],
        );

        match self.paginate(page, &req.to_query(), false).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Posts retrieved successfully")
                    .await;
                Ok(response)
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to retrieve posts: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn search(
        &self,
        req: &SearchPostRequest,
    ) -> Result<ApiResponsePagination<Vec<PostResponse>>, AppError> {
        let method = Method::Get;
        let page = req.page_query();
        let query = req.to_query();

        let tracing_ctx = self.tracer.start(
            "SearchPosts",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("page", page.page),
                KeyValue::new("limit", page.limit),
                KeyValue::new("search", query.search.clone().unwrap_or_default()),
            ],
        );

        match self.paginate(page, &query, true).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Posts searched successfully")
                    .await;
                Ok(response)
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to search posts: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PostResponse>, AppError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "FindPostById",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("post.id", id.to_string()),
            ],
        );

        match self.existing(id).await {
            Ok(post) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Post retrieved successfully")
                    .await;
                Ok(ApiResponse::ok(PostResponse::from(post)))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to retrieve post {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn create(
        &self,
        actor: &AuthUser,
        req: &CreatePostRequest,
    ) -> Result<ApiResponse<PostResponse>, AppError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "CreatePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("user.id", actor.id.to_string()),
            ],
        );

        match self.create_post(actor, req).await {
            Ok(post) => {
                info!("Post {} created by {}", post.id, actor.id);
                self.tracer
                    .complete_success(&tracing_ctx, method, "Post created successfully")
                    .await;
                Ok(ApiResponse::with_message(
                    "Post criado com sucesso",
                    PostResponse::from(post),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to create post: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        req: &UpdatePostRequest,
    ) -> Result<ApiResponse<PostResponse>, AppError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "UpdatePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("post.id", id.to_string()),
                KeyValue::new("user.id", actor.id.to_string()),
            ],
        );

        match self.update_post(actor, id, req).await {
            Ok(post) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Post updated successfully")
                    .await;
                Ok(ApiResponse::with_message(
                    "Post atualizado com sucesso",
                    PostResponse::from(post),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to update post {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "DeletePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("post.id", id.to_string()),
                KeyValue::new("user.id", actor.id.to_string()),
            ],
        );

        match self.delete_post(actor, id).await {
            Ok(()) => {
                info!("Post {} deleted by {}", id, actor.id);
                self.tracer
                    .complete_success(&tracing_ctx, method, "Post deleted successfully")
                    .await;
                Ok(())
            }
            Err(err) => {
                self.tracer
                    .complete_error(
                        &tracing_ctx,
                        method,
                        &format!("Failed to delete post {id}: {err}"),
                    )
                    .await;
                Err(err)
            }
        }
    }
}

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        ApiResponse, ApiResponsePagination, CreatePostRequest, FindAllPostRequest, PostResponse,
        SearchPostRequest, UpdatePostRequest,
    },
    model::posts::{NewPost, Post, PostChanges, PostQuery},
    policy::AuthUser,
    utils::AppError,
};

pub type DynPostsRepository = Arc<dyn PostsRepositoryTrait + Send + Sync>;
pub type DynPostsService = Arc<dyn PostsServiceTrait + Send + Sync>;

#[async_trait]
pub trait PostsRepositoryTrait {
    /// Newest first; returns the page together with the total matching count.
    async fn find_all(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError>;
    async fn search(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError>;
    async fn create(&self, input: &NewPost) -> Result<Post, AppError>;
    async fn update(&self, id: i32, input: &PostChanges) -> Result<Post, AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait PostsServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllPostRequest,
    ) -> Result<ApiResponsePagination<Vec<PostResponse>>, AppError>;
    async fn search(
        &self,
        req: &SearchPostRequest,
    ) -> Result<ApiResponsePagination<Vec<PostResponse>>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PostResponse>, AppError>;
    async fn create(
        &self,
        actor: &AuthUser,
        req: &CreatePostRequest,
    ) -> Result<ApiResponse<PostResponse>, AppError>;
    async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        req: &UpdatePostRequest,
    ) -> Result<ApiResponse<PostResponse>, AppError>;
    async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::{
    posts::PostSummary,
    user::{AppRole, Role, User},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPostResponse {
    pub id: i32,
    pub titulo: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostSummary> for UserPostResponse {
    fn from(post: PostSummary) -> Self {
        UserPostResponse {
            id: post.id,
            titulo: post.titulo,
            created_at: post.created_at,
        }
    }
}

/// Public view of a user; the password hash never leaves the service layer.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub app_role: AppRole,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub posts: Vec<UserPostResponse>,
}

impl UserResponse {
    pub fn with_posts(user: User, posts: Vec<PostSummary>) -> Self {
        let mut response = UserResponse::from(user);
        response.posts = posts.into_iter().map(UserPostResponse::from).collect();
        response
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let app_role = user.app_role();
        let role = if user.role == Role::Admin.as_str() {
            Role::Admin
        } else {
            Role::User
        };

        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            app_role,
            role,
            created_at: user.created_at,
            updated_at: user.updated_at,
            posts: Vec::new(),
        }
    }
}

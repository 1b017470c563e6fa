use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::posts::Post;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostAuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub titulo: String,
    pub conteudo: String,
    pub autor: String,
    pub author_id: Uuid,
    pub author: PostAuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            titulo: post.titulo,
            conteudo: post.conteudo,
            autor: post.autor,
            author_id: post.author_id,
            author: PostAuthorResponse {
                id: post.author_id,
                name: post.author_name,
                email: post.author_email,
            },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

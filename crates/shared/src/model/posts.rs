use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A post row joined with the name and email of its author.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: i32,
    pub titulo: String,
    pub conteudo: String,
    pub autor: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PostSummary {
    pub id: i32,
    pub titulo: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub titulo: String,
    pub conteudo: String,
    pub autor: String,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub titulo: Option<String>,
    pub conteudo: Option<String>,
    pub autor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub skip: i64,
    pub take: i64,
    pub author_id: Option<Uuid>,
    pub search: Option<String>,
}

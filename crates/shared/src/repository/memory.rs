use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::abstract_trait::{PostsRepositoryTrait, UserRepositoryTrait};
use crate::model::{
    posts::{NewPost, Post, PostChanges, PostQuery, PostSummary},
    user::{NewUser, User, UserChanges, UserQuery},
};
use crate::utils::AppError;

#[derive(Debug, Clone)]
struct PostRow {
    id: i32,
    titulo: String,
    conteudo: String,
    autor: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<PostRow>,
    next_post_id: i32,
}

impl Tables {
    fn join(&self, row: &PostRow) -> Option<Post> {
        let author = self.users.iter().find(|u| u.id == row.author_id)?;
        Some(Post {
            id: row.id,
            titulo: row.titulo.clone(),
            conteudo: row.conteudo.clone(),
            autor: row.autor.clone(),
            author_id: row.author_id,
            author_name: author.name.clone(),
            author_email: author.email.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Process-local storage behaving like the Postgres schema: posts reference
/// users, deleting a user cascades to their posts and emails are unique.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_repository(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            store: self.clone(),
        }
    }

    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page<T>(items: Vec<T>, skip: i64, take: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(skip.max(0) as usize)
        .take(take.max(0) as usize)
        .collect()
}

pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

impl InMemoryPostRepository {
    async fn fetch_page(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        let tables = self.store.tables.read().await;

        let mut matching: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| query.author_id.is_none_or(|id| p.author_id == id))
            .filter(|p| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| contains_ci(&p.titulo, term) || contains_ci(&p.conteudo, term))
            })
            .filter_map(|p| tables.join(p))
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        Ok((page(matching, query.skip, query.take), total))
    }
}

#[async_trait]
impl PostsRepositoryTrait for InMemoryPostRepository {
    async fn find_all(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        let query = PostQuery {
            search: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn search(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        self.fetch_page(query).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| tables.join(p)))
    }

    async fn create(&self, input: &NewPost) -> Result<Post, AppError> {
        let mut tables = self.store.tables.write().await;

        if !tables.users.iter().any(|u| u.id == input.author_id) {
            return Err(AppError::ForeignKeyViolation);
        }

        tables.next_post_id += 1;
        let now = Utc::now();
        let row = PostRow {
            id: tables.next_post_id,
            titulo: input.titulo.clone(),
            conteudo: input.conteudo.clone(),
            autor: input.autor.clone(),
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(row.clone());

        tables
            .join(&row)
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))
    }

    async fn update(&self, id: i32, input: &PostChanges) -> Result<Post, AppError> {
        let mut tables = self.store.tables.write().await;

        let row = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))?;

        if let Some(titulo) = &input.titulo {
            row.titulo = titulo.clone();
        }
        if let Some(conteudo) = &input.conteudo {
            row.conteudo = conteudo.clone();
        }
        if let Some(autor) = &input.autor {
            row.autor = autor.clone();
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        tables
            .join(&row)
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.retain(|p| p.id != id);
        Ok(())
    }
}

pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    async fn fetch_page(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        let tables = self.store.tables.read().await;

        let mut matching: Vec<User> = tables
            .users
            .iter()
            .filter(|u| query.app_role.as_deref().is_none_or(|role| u.app_role == role))
            .filter(|u| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| contains_ci(&u.name, term) || contains_ci(&u.email, term))
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        Ok((page(matching, query.skip, query.take), total))
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    async fn find_all(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        let query = UserQuery {
            search: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn search(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        let query = UserQuery {
            app_role: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_exists(&self, email: &str) -> Result<bool, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.iter().any(|u| u.email == email))
    }

    async fn create(&self, input: &NewUser) -> Result<User, AppError> {
        let mut tables = self.store.tables.write().await;

        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: input.id,
            name: input.name.clone(),
            email: input.email.clone(),
            password: input.password_hash.clone(),
            app_role: input.app_role.as_str().to_string(),
            role: input.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn update(&self, id: Uuid, input: &UserChanges) -> Result<User, AppError> {
        let mut tables = self.store.tables.write().await;

        if let Some(email) = &input.email {
            if tables.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::EmailAlreadyExists);
            }
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;

        if let Some(name) = &input.name {
            user.name = name.clone();
        }
        if let Some(email) = &input.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &input.password_hash {
            user.password = password_hash.clone();
        }
        if let Some(app_role) = input.app_role {
            user.app_role = app_role.as_str().to_string();
        }
        if let Some(role) = input.role {
            user.role = role.as_str().to_string();
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        tables.users.retain(|u| u.id != id);
        tables.posts.retain(|p| p.author_id != id);
        Ok(())
    }

    async fn find_posts(&self, user_ids: &[Uuid]) -> Result<Vec<PostSummary>, AppError> {
        let tables = self.store.tables.read().await;

        let mut posts: Vec<PostSummary> = tables
            .posts
            .iter()
            .filter(|p| user_ids.contains(&p.author_id))
            .map(|p| PostSummary {
                id: p.id,
                titulo: p.titulo.clone(),
                author_id: p.author_id,
                created_at: p.created_at,
            })
            .collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(posts)
    }
}

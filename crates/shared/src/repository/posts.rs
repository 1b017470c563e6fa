use async_trait::async_trait;
use sea_query::{
    Alias, Cond, Expr, Func, Order, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use super::contains_pattern;
use crate::abstract_trait::PostsRepositoryTrait;
use crate::config::ConnectionPool;
use crate::model::posts::{NewPost, Post, PostChanges, PostQuery};
use crate::schema::{posts::Posts, user::Users};
use crate::utils::AppError;

pub struct PostRepository {
    db_pool: ConnectionPool,
}

impl PostRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    fn select_posts() -> SelectStatement {
        Query::select()
            .columns([
                (Posts::Table, Posts::Id),
                (Posts::Table, Posts::Titulo),
                (Posts::Table, Posts::Conteudo),
                (Posts::Table, Posts::Autor),
                (Posts::Table, Posts::AuthorId),
                (Posts::Table, Posts::CreatedAt),
                (Posts::Table, Posts::UpdatedAt),
            ])
            .expr_as(
                Expr::col((Users::Table, Users::Name)),
                Alias::new("author_name"),
            )
            .expr_as(
                Expr::col((Users::Table, Users::Email)),
                Alias::new("author_email"),
            )
            .from(Posts::Table)
            .inner_join(
                Users::Table,
                Expr::col((Posts::Table, Posts::AuthorId)).equals((Users::Table, Users::Id)),
            )
            .to_owned()
    }

    fn conditions(query: &PostQuery) -> Cond {
        let mut cond = Cond::all();

        if let Some(author_id) = query.author_id {
            cond = cond.add(Expr::col((Posts::Table, Posts::AuthorId)).eq(author_id));
        }

        if let Some(term) = &query.search {
            cond = cond.add(
                Cond::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((Posts::Table, Posts::Titulo))))
                            .like(contains_pattern(term)),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((Posts::Table, Posts::Conteudo))))
                            .like(contains_pattern(term)),
                    ),
            );
        }

        cond
    }

    async fn fetch_page(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        let (sql, values) = Self::select_posts()
            .cond_where(Self::conditions(query))
            .order_by((Posts::Table, Posts::CreatedAt), Order::Desc)
            .order_by((Posts::Table, Posts::Id), Order::Desc)
            .limit(query.take.max(0) as u64)
            .offset(query.skip.max(0) as u64)
            .build_sqlx(PostgresQueryBuilder);

        let posts = sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching posts: {}", e);
                AppError::from(e)
            })?;

        let (count_sql, count_values) = Query::select()
            .expr(Func::count(Expr::col((Posts::Table, Posts::Id))))
            .from(Posts::Table)
            .cond_where(Self::conditions(query))
            .build_sqlx(PostgresQueryBuilder);

        let total = sqlx::query_as_with::<_, (i64,), _>(&count_sql, count_values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error counting posts: {}", e);
                AppError::from(e)
            })?
            .0;

        info!("Found {} posts out of total {}", posts.len(), total);

        Ok((posts, total))
    }
}

#[async_trait]
impl PostsRepositoryTrait for PostRepository {
    async fn find_all(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        info!(
            "Finding all posts - skip: {}, take: {}, author: {:?}",
            query.skip, query.take, query.author_id
        );

        let query = PostQuery {
            search: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn search(&self, query: &PostQuery) -> Result<(Vec<Post>, i64), AppError> {
        info!(
            "Searching posts - skip: {}, take: {}, search: {:?}",
            query.skip, query.take, query.search
        );

        self.fetch_page(query).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        let (sql, values) = Self::select_posts()
            .and_where(Expr::col((Posts::Table, Posts::Id)).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let post = sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(post)
    }

    async fn create(&self, input: &NewPost) -> Result<Post, AppError> {
        let (sql, values) = Query::insert()
            .into_table(Posts::Table)
            .columns([
                Posts::Titulo,
                Posts::Conteudo,
                Posts::Autor,
                Posts::AuthorId,
            ])
            .values([
                input.titulo.clone().into(),
                input.conteudo.clone().into(),
                input.autor.clone().into(),
                input.author_id.into(),
            ])?
            .returning_col(Posts::Id)
            .build_sqlx(PostgresQueryBuilder);

        let (id,): (i32,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        info!("Created post {}", id);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))
    }

    async fn update(&self, id: i32, input: &PostChanges) -> Result<Post, AppError> {
        let mut query = Query::update();
        query
            .table(Posts::Table)
            .value(Posts::UpdatedAt, Expr::current_timestamp())
            .and_where(Expr::col(Posts::Id).eq(id));

        if let Some(titulo) = &input.titulo {
            query.value(Posts::Titulo, titulo.clone());
        }

        if let Some(conteudo) = &input.conteudo {
            query.value(Posts::Conteudo, conteudo.clone());
        }

        if let Some(autor) = &input.autor {
            query.value(Posts::Autor, autor.clone());
        }

        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post não encontrado".to_string()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post não encontrado".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let (sql, values) = Query::delete()
            .from_table(Posts::Table)
            .and_where(Expr::col(Posts::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }
}

use async_trait::async_trait;
use sea_query::{Cond, Expr, Func, Order, PostgresQueryBuilder, Query, SelectStatement};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};
use uuid::Uuid;

use super::contains_pattern;
use crate::abstract_trait::UserRepositoryTrait;
use crate::config::ConnectionPool;
use crate::model::{
    posts::PostSummary,
    user::{NewUser, User, UserChanges, UserQuery},
};
use crate::schema::{posts::Posts, user::Users};
use crate::utils::AppError;

pub struct UserRepository {
    db_pool: ConnectionPool,
}

impl UserRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    fn select_users() -> SelectStatement {
        Query::select()
            .columns([
                Users::Id,
                Users::Name,
                Users::Email,
                Users::Password,
                Users::AppRole,
                Users::Role,
                Users::CreatedAt,
                Users::UpdatedAt,
            ])
            .from(Users::Table)
            .to_owned()
    }

    fn conditions(query: &UserQuery) -> Cond {
        let mut cond = Cond::all();

        if let Some(app_role) = &query.app_role {
            cond = cond.add(Expr::col(Users::AppRole).eq(app_role.clone()));
        }

        if let Some(term) = &query.search {
            cond = cond.add(
                Cond::any()
                    .add(Expr::expr(Func::lower(Expr::col(Users::Name))).like(contains_pattern(term)))
                    .add(Expr::expr(Func::lower(Expr::col(Users::Email))).like(contains_pattern(term))),
            );
        }

        cond
    }

    async fn fetch_page(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        let (sql, values) = Self::select_users()
            .cond_where(Self::conditions(query))
            .order_by(Users::CreatedAt, Order::Desc)
            .order_by(Users::Id, Order::Asc)
            .limit(query.take.max(0) as u64)
            .offset(query.skip.max(0) as u64)
            .build_sqlx(PostgresQueryBuilder);

        let users = match sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
        {
            Ok(u) => u,
            Err(e) => {
                error!("Error fetching users: {}", e);
                return Err(AppError::from(e));
            }
        };

        let (count_sql, count_values) = Query::select()
            .expr(Func::count(Expr::col(Users::Id)))
            .from(Users::Table)
            .cond_where(Self::conditions(query))
            .build_sqlx(PostgresQueryBuilder);

        let total = match sqlx::query_as_with::<_, (i64,), _>(&count_sql, count_values)
            .fetch_one(&self.db_pool)
            .await
        {
            Ok(count) => count.0,
            Err(e) => {
                error!("Error counting users: {}", e);
                return Err(AppError::from(e));
            }
        };

        info!("Found {} users out of total {}", users.len(), total);

        Ok((users, total))
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_all(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        info!(
            "Finding all users - skip: {}, take: {}, role: {:?}",
            query.skip, query.take, query.app_role
        );

        let query = UserQuery {
            search: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn search(&self, query: &UserQuery) -> Result<(Vec<User>, i64), AppError> {
        info!(
            "Searching users - skip: {}, take: {}, search: {:?}",
            query.skip, query.take, query.search
        );

        let query = UserQuery {
            app_role: None,
            ..query.clone()
        };
        self.fetch_page(&query).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let (sql, values) = Self::select_users()
            .and_where(Expr::col(Users::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let (sql, values) = Self::select_users()
            .and_where(Expr::col(Users::Email).eq(email))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email_exists(&self, email: &str) -> Result<bool, AppError> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col(Users::Id)))
            .from(Users::Table)
            .and_where(Expr::col(Users::Email).eq(email))
            .build_sqlx(PostgresQueryBuilder);

        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, input: &NewUser) -> Result<User, AppError> {
        let (sql, values) = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Id,
                Users::Name,
                Users::Email,
                Users::Password,
                Users::AppRole,
                Users::Role,
            ])
            .values([
                input.id.into(),
                input.name.clone().into(),
                input.email.clone().into(),
                input.password_hash.clone().into(),
                input.app_role.as_str().into(),
                input.role.as_str().into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let user: User = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        info!("Created user {}", user.id);

        Ok(user)
    }

    async fn update(&self, id: Uuid, input: &UserChanges) -> Result<User, AppError> {
        let mut query = Query::update();
        query
            .table(Users::Table)
            .value(Users::UpdatedAt, Expr::current_timestamp())
            .and_where(Expr::col(Users::Id).eq(id));

        if let Some(name) = &input.name {
            query.value(Users::Name, name.clone());
        }

        if let Some(email) = &input.email {
            query.value(Users::Email, email.clone());
        }

        if let Some(password_hash) = &input.password_hash {
            query.value(Users::Password, password_hash.clone());
        }

        if let Some(app_role) = input.app_role {
            query.value(Users::AppRole, app_role.as_str());
        }

        if let Some(role) = input.role {
            query.value(Users::Role, role.as_str());
        }

        query.returning_all();

        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);
        let user = sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        user.ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let (sql, values) = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    async fn find_posts(&self, user_ids: &[Uuid]) -> Result<Vec<PostSummary>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, values) = Query::select()
            .columns([Posts::Id, Posts::Titulo, Posts::AuthorId, Posts::CreatedAt])
            .from(Posts::Table)
            .and_where(Expr::col(Posts::AuthorId).is_in(user_ids.iter().copied()))
            .order_by(Posts::CreatedAt, Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let posts = sqlx::query_as_with(&sql, values)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(posts)
    }
}

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        DynAuthService, DynPostsRepository, DynPostsService, DynUserRepository, DynUserService,
    },
    config::{ConnectionPool, Hashing, JwtConfig},
    repository::{PostRepository, UserRepository},
    service::{AuthService, PostService, UserService},
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub post_service: DynPostsService,
    pub user_service: DynUserService,
    pub auth_service: DynAuthService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("post_service", &"DynPostsService")
            .field("user_service", &"DynUserService")
            .field("auth_service", &"DynAuthService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        hashing: Hashing,
        jwt_config: JwtConfig,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        let post_repository = Arc::new(PostRepository::new(pool.clone())) as DynPostsRepository;
        let user_repository = Arc::new(UserRepository::new(pool)) as DynUserRepository;

        Self::from_repositories(post_repository, user_repository, hashing, jwt_config, metrics)
    }

    /// Wires the services over any repository implementation.
    pub fn from_repositories(
        post_repository: DynPostsRepository,
        user_repository: DynUserRepository,
        hashing: Hashing,
        jwt_config: JwtConfig,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        let post_service =
            Arc::new(PostService::new(post_repository, metrics.clone())) as DynPostsService;

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            hashing.clone(),
            metrics.clone(),
        )) as DynUserService;

        let auth_service = Arc::new(AuthService::new(
            user_repository,
            hashing,
            jwt_config,
            metrics,
        )) as DynAuthService;

        Self {
            post_service,
            user_service,
            auth_service,
        }
    }
}

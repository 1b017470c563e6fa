use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynPostsRepository, DynUserRepository},
    config::{Config, ConnectionPool, Hashing, JwtConfig},
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub di_container: DependenciesInject,
    pub jwt_config: JwtConfig,
    pub metrics: Arc<Mutex<Metrics>>,
    pub port: u16,
}

fn registered_metrics() -> (Arc<Registry>, Arc<Mutex<Metrics>>) {
    let mut registry = Registry::default();
    let metrics = Metrics::new();
    metrics.register(&mut registry);

    (Arc::new(registry), Arc::new(Mutex::new(metrics)))
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Self {
        let jwt_config = JwtConfig::new(&config.jwt_secret, config.jwt_expires_in_hours);
        let (registry, metrics) = registered_metrics();

        let di_container = DependenciesInject::new(
            pool,
            Hashing::default(),
            jwt_config.clone(),
            metrics.clone(),
        );

        Self {
            registry,
            di_container,
            jwt_config,
            metrics,
            port: config.port,
        }
    }

    /// State over caller-provided repositories, e.g. the in-memory store.
    pub fn from_repositories(
        post_repository: DynPostsRepository,
        user_repository: DynUserRepository,
        hashing: Hashing,
        jwt_config: JwtConfig,
        port: u16,
    ) -> Self {
        let (registry, metrics) = registered_metrics();

        let di_container = DependenciesInject::from_repositories(
            post_repository,
            user_repository,
            hashing,
            jwt_config.clone(),
            metrics.clone(),
        );

        Self {
            registry,
            di_container,
            jwt_config,
            metrics,
            port,
        }
    }
}

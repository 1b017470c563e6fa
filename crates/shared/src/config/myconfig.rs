use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_EXPIRES_IN_HOURS: i64 = 24;
const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

/// Credentials of an administrator created at startup when absent.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    pub port: u16,
    pub run_migrations: bool,
    pub otel_endpoint: String,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    pub fn init() -> Result<Config> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so it can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {port}"))?,
            None => DEFAULT_PORT,
        };

        let jwt_expires_in_hours = match lookup("JWT_EXPIRES_IN_HOURS") {
            Some(hours) => hours
                .parse::<i64>()
                .context("JWT_EXPIRES_IN_HOURS must be an integer")?,
            None => DEFAULT_JWT_EXPIRES_IN_HOURS,
        };

        let run_migrations = lookup("RUN_MIGRATIONS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        let otel_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string());

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                name: lookup("ADMIN_NAME").unwrap_or_else(|| "Administrador".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expires_in_hours,
            port,
            run_migrations,
            otel_endpoint,
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_expires_in_hours, 24);
        assert!(config.run_migrations);
        assert!(config.admin.is_none());
    }

    #[test]
    fn required_keys_are_enforced() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn admin_bootstrap_needs_email_and_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", "secret"),
            ("ADMIN_EMAIL", "admin@blog.dev"),
            ("ADMIN_PASSWORD", "trocar123"),
            ("RUN_MIGRATIONS", "false"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "admin@blog.dev");
        assert_eq!(admin.name, "Administrador");
        assert!(!config.run_migrations);
        assert_eq!(config.port, 8080);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub app_role: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Rows written outside the application may carry an unknown role; those
    /// are treated as the least privileged one.
    pub fn app_role(&self) -> AppRole {
        AppRole::parse(&self.app_role).unwrap_or_default()
    }
}

/// Business role of a user inside the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppRole {
    Admin,
    Teacher,
    #[default]
    Student,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "ADMIN",
            AppRole::Teacher => "TEACHER",
            AppRole::Student => "STUDENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(AppRole::Admin),
            "TEACHER" => Some(AppRole::Teacher),
            "STUDENT" => Some(AppRole::Student),
            _ => None,
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access-control role, independent from [`AppRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub app_role: AppRole,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub app_role: Option<AppRole>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub skip: i64,
    pub take: i64,
    pub app_role: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_role_parses_known_values() {
        assert_eq!(AppRole::parse("ADMIN"), Some(AppRole::Admin));
        assert_eq!(AppRole::parse("TEACHER"), Some(AppRole::Teacher));
        assert_eq!(AppRole::parse("STUDENT"), Some(AppRole::Student));
        assert_eq!(AppRole::parse("student"), None);
    }

    #[test]
    fn roles_serialize_in_their_wire_casing() {
        assert_eq!(
            serde_json::to_string(&AppRole::Teacher).unwrap(),
            "\"TEACHER\""
        );
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}

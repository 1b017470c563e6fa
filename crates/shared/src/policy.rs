//! Authorization checks, evaluated before any business validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::user::{AppRole, User};

/// The caller resolved by the authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub app_role: AppRole,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        AuthUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            app_role: user.app_role(),
        }
    }
}

impl AuthUser {
    pub fn is_staff(&self) -> bool {
        matches!(self.app_role, AppRole::Admin | AppRole::Teacher)
    }
}

/// ADMIN and TEACHER may modify anything; a STUDENT only what they own.
pub fn can_modify(actor: &AuthUser, owner_id: Uuid) -> bool {
    actor.is_staff() || actor.id == owner_id
}

/// Only staff may create accounts or hand out roles.
pub fn can_manage_users(actor: &AuthUser) -> bool {
    actor.is_staff()
}

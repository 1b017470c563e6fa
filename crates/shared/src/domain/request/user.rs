use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{PageQuery, lenient_number, non_empty};
use crate::model::user::{AppRole, Role, UserQuery};

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllUserRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,

    /// Filters on the application role, e.g. `TEACHER`.
    #[serde(default)]
    pub role: Option<String>,
}

impl FindAllUserRequest {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }

    pub fn to_query(&self) -> UserQuery {
        let page = self.page_query();
        UserQuery {
            skip: page.skip(),
            take: page.limit,
            app_role: non_empty(&self.role),
            search: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchUserRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,

    #[serde(default)]
    pub search: Option<String>,
}

impl SearchUserRequest {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }

    pub fn to_query(&self) -> UserQuery {
        let page = self.page_query();
        UserQuery {
            skip: page.skip(),
            take: page.limit,
            app_role: None,
            search: non_empty(&self.search),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub app_role: Option<AppRole>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub app_role: Option<AppRole>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

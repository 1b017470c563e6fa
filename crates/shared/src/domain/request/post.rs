use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{PageQuery, lenient_number, non_empty};
use crate::model::posts::PostQuery;

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllPostRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,

    #[serde(default, rename = "authorId")]
    pub author_id: Option<Uuid>,
}

impl FindAllPostRequest {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }

    pub fn to_query(&self) -> PostQuery {
        let page = self.page_query();
        PostQuery {
            skip: page.skip(),
            take: page.limit,
            author_id: self.author_id,
            search: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchPostRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde(default, rename = "authorId")]
    pub author_id: Option<Uuid>,
}

impl SearchPostRequest {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }

    pub fn to_query(&self) -> PostQuery {
        let page = self.page_query();
        PostQuery {
            skip: page.skip(),
            take: page.limit,
            author_id: self.author_id,
            search: non_empty(&self.search),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, Default)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub titulo: Option<String>,

    #[serde(default)]
    pub conteudo: Option<String>,

    /// Optional byline; defaults to the author's account name.
    #[serde(default)]
    pub autor: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, Default)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub titulo: Option<String>,

    #[serde(default)]
    pub conteudo: Option<String>,

    #[serde(default)]
    pub autor: Option<String>,
}

mod auth;
mod post;
mod user;

use serde::{Deserialize, Deserializer};

pub use self::auth::LoginRequest;
pub use self::post::{CreatePostRequest, FindAllPostRequest, SearchPostRequest, UpdatePostRequest};
pub use self::user::{
    ChangePasswordRequest, CreateUserRequest, FindAllUserRequest, SearchUserRequest,
    UpdateUserRequest,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Query-string numbers are parsed leniently: the leading integer is taken
/// (`"25abc"` is 25) and a value without one is treated as absent so the
/// defaults apply.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(leading_integer))
}

fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    // only overflow can fail here
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub limit: i64,
}

impl PageQuery {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_falls_back_to_defaults() {
        assert_eq!(PageQuery::new(None, None), PageQuery { page: 1, limit: 10 });
        assert_eq!(
            PageQuery::new(Some(0), Some(-3)),
            PageQuery { page: 1, limit: 10 }
        );
    }

    #[test]
    fn skip_is_derived_from_page_and_limit() {
        assert_eq!(PageQuery::new(Some(1), Some(10)).skip(), 0);
        assert_eq!(PageQuery::new(Some(3), Some(5)).skip(), 10);
    }

    #[test]
    fn lenient_query_ignores_garbage() {
        let params: FindAllPostRequest =
            serde_json::from_str(r#"{"page":"abc","limit":"25"}"#).unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.limit, Some(25));
    }

    #[test]
    fn lenient_query_takes_the_leading_integer() {
        let params: FindAllPostRequest =
            serde_json::from_str(r#"{"page":" 2.5","limit":"25abc"}"#).unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(25));

        assert_eq!(leading_integer("-3"), Some(-3));
        assert_eq!(leading_integer("x25"), None);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(non_empty(&Some("   ".into())), None);
        assert_eq!(non_empty(&Some(" rust ".into())), Some("rust".into()));
        assert_eq!(non_empty(&None), None);
    }
}

mod auth;
mod posts;
mod user;

pub use self::auth::AuthService;
pub use self::posts::PostService;
pub use self::user::UserService;

/// Present values are persisted trimmed.
fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

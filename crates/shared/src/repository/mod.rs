mod memory;
mod posts;
mod user;

pub use self::memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
pub use self::posts::PostRepository;
pub use self::user::UserRepository;

use sea_query::LikeExpr;

/// `%term%` pattern for a case-insensitive substring match; the term is
/// lowercased and LIKE wildcards in it are escaped.
pub(crate) fn contains_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

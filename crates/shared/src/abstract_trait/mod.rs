mod auth;
mod posts;
mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::posts::{DynPostsRepository, DynPostsService, PostsRepositoryTrait, PostsServiceTrait};
pub use self::user::{DynUserRepository, DynUserService, UserRepositoryTrait, UserServiceTrait};

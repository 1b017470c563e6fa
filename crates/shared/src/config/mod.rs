mod database;
mod hashing;
mod jwt;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::JwtConfig;
pub use self::myconfig::{AdminBootstrap, Config};

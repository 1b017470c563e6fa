mod api;
mod post;
mod user;

pub use self::api::{
    ApiResponse, ApiResponsePagination, ErrorResponse, MessageResponse, Pagination,
    TokenResponse,
};
pub use self::post::{PostAuthorResponse, PostResponse};
pub use self::user::{UserPostResponse, UserResponse};

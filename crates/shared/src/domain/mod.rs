mod request;
mod response;

pub use self::request::{
    ChangePasswordRequest, CreatePostRequest, CreateUserRequest, FindAllPostRequest,
    FindAllUserRequest, LoginRequest, PageQuery, SearchPostRequest, SearchUserRequest,
    UpdatePostRequest, UpdateUserRequest,
};

pub use self::response::{
    ApiResponse, ApiResponsePagination, ErrorResponse, MessageResponse, Pagination,
    PostAuthorResponse, PostResponse, TokenResponse, UserPostResponse, UserResponse,
};

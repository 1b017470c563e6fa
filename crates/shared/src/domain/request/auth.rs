use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email deve ser válido"))]
    pub email: String,

    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
}

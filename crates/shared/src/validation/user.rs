use super::{ValidationError, is_blank, trimmed_len};
use crate::domain::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};

pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;

fn fail(message: &str) -> Result<(), ValidationError> {
    Err(ValidationError::User(message.to_string()))
}

fn check_name_len(name: &str) -> Result<(), ValidationError> {
    if trimmed_len(name) > NAME_MAX_LEN {
        return fail("Nome deve ter no máximo 100 caracteres");
    }
    Ok(())
}

/// Validates a user about to be created.
///
/// The password message mentions 5 characters while the enforced minimum is
/// 6. Clients match on the message text, so it is kept as is until the
/// product decides which of the two is right.
pub fn validate_create_user(data: &CreateUserRequest) -> Result<(), ValidationError> {
    if is_blank(data.name.as_deref()) {
        return fail("Nome é obrigatório");
    }
    check_name_len(data.name.as_deref().unwrap_or_default())?;

    if is_blank(data.email.as_deref()) {
        return fail("Email é obrigatório");
    }

    if is_blank(data.password.as_deref()) {
        return fail("Senha é obrigatório");
    }
    if trimmed_len(data.password.as_deref().unwrap_or_default()) < PASSWORD_MIN_LEN {
        return fail("Senha deve ter no mínimo 5 caracteres");
    }

    Ok(())
}

/// Validates a partial user update. `email`, `app_role` and `role` are not
/// checked here.
pub fn validate_update_user(data: &UpdateUserRequest) -> Result<(), ValidationError> {
    if let Some(name) = data.name.as_deref() {
        if name.trim().is_empty() {
            return fail("Nome não pode ser vazio");
        }
        check_name_len(name)?;
    }

    if let Some(password) = data.password.as_deref() {
        if trimmed_len(password) < PASSWORD_MIN_LEN {
            return fail("Senha deve ter pelo menos 5 caracteres");
        }
    }

    Ok(())
}

pub fn validate_change_password(data: &ChangePasswordRequest) -> Result<(), ValidationError> {
    let new_password = data.new_password.as_deref().unwrap_or_default();
    if trimmed_len(new_password) < PASSWORD_MIN_LEN {
        return fail("A nova senha deve ter no mínimo 6 caracteres");
    }
    Ok(())
}

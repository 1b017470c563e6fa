use super::{ValidationError, is_blank, trimmed_len};
use crate::domain::{CreatePostRequest, UpdatePostRequest};

pub const TITULO_MAX_LEN: usize = 200;
pub const CONTEUDO_MIN_LEN: usize = 10;
pub const CONTEUDO_MAX_LEN: usize = 5000;
pub const AUTOR_MAX_LEN: usize = 100;

fn fail(message: &str) -> Result<(), ValidationError> {
    Err(ValidationError::Post(message.to_string()))
}

fn check_titulo_len(titulo: &str) -> Result<(), ValidationError> {
    if trimmed_len(titulo) > TITULO_MAX_LEN {
        return fail("Título deve ter no máximo 200 caracteres");
    }
    Ok(())
}

fn check_conteudo_len(conteudo: &str) -> Result<(), ValidationError> {
    let len = trimmed_len(conteudo);
    if len < CONTEUDO_MIN_LEN {
        return fail("Conteúdo deve ter pelo menos 10 caracteres");
    }
    if len > CONTEUDO_MAX_LEN {
        return fail("Conteúdo deve ter no máximo 5000 caracteres");
    }
    Ok(())
}

fn check_autor_len(autor: &str) -> Result<(), ValidationError> {
    if trimmed_len(autor) > AUTOR_MAX_LEN {
        return fail("Autor deve ter no máximo 100 caracteres");
    }
    Ok(())
}

/// Validates a post about to be created.
///
/// Posts are owned through `author_id` (the authenticated caller) and also
/// carry a free-text `autor` byline. The byline is optional in the body: when
/// present it must be non-blank and at most 100 characters, when absent the
/// service stores the owner's account name.
pub fn validate_create_post(data: &CreatePostRequest) -> Result<(), ValidationError> {
    if is_blank(data.titulo.as_deref()) {
        return fail("Título é obrigatório");
    }
    check_titulo_len(data.titulo.as_deref().unwrap_or_default())?;

    match data.conteudo.as_deref() {
        Some(conteudo) => check_conteudo_len(conteudo)?,
        None => return fail("Conteúdo deve ter pelo menos 10 caracteres"),
    }

    if let Some(autor) = data.autor.as_deref() {
        if autor.trim().is_empty() {
            return fail("Autor é obrigatório");
        }
        check_autor_len(autor)?;
    }

    Ok(())
}

/// Validates a partial post update. Absent fields are left untouched and
/// therefore not checked; an empty update is valid.
pub fn validate_update_post(data: &UpdatePostRequest) -> Result<(), ValidationError> {
    if let Some(titulo) = data.titulo.as_deref() {
        if titulo.trim().is_empty() {
            return fail("Título não pode ser vazio");
        }
        check_titulo_len(titulo)?;
    }

    if let Some(conteudo) = data.conteudo.as_deref() {
        if conteudo.trim().is_empty() {
            return fail("Conteúdo não pode ser vazio");
        }
        check_conteudo_len(conteudo)?;
    }

    if let Some(autor) = data.autor.as_deref() {
        if autor.trim().is_empty() {
            return fail("Autor não pode ser vazio");
        }
        check_autor_len(autor)?;
    }

    Ok(())
}

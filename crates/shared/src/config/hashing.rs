use crate::utils::AppError;
use bcrypt::{BcryptError, DEFAULT_COST, hash, verify};

#[derive(Clone, Debug)]
pub struct Hashing {
    cost: u32,
}

impl Default for Hashing {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl Hashing {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, BcryptError> {
        hash(password, self.cost)
    }

    pub async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), AppError> {
        match verify(password, hashed_password) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::InvalidCredentials),
            Err(e) => Err(AppError::HashingError(e)),
        }
    }
}

use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::request::{LoginRequest, SignupRequest},
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        request.validate()?;

        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError(
                "All fields are required".to_string(),
            ));
        }
        if self.repository.find_by_username(username).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "Username already exists".to_string(),
            ));
        }

        let user = self
            .repository
            .create(User::new(username, &request.password))
            .await?;
        log::info!("Registered user '{}'", user.username);
        Ok(user)
    }

    pub async fn user_count(&self) -> AppResult<usize> {
        self.repository.count().await
    }

    /// Checks the credentials. Unknown users and wrong passwords get the same
    /// error.
    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .filter(|user| user.verify_password(&request.password))
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        log::info!("User '{}' logged in", user.username);
        Ok(user)
    }
}

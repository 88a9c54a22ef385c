use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn count(&self) -> AppResult<usize>;
}

/// Users kept in memory and rewritten to a JSON file on every change.
pub struct JsonUserRepository {
    path: PathBuf,
    users: RwLock<BTreeMap<String, User>>,
}

impl JsonUserRepository {
    /// Loads the store; a missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let users = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                let list: Vec<User> = serde_json::from_str(&raw)?;
                list.into_iter().map(|u| (u.username.clone(), u)).collect()
            }
        } else {
            BTreeMap::new()
        };

        log::info!("Loaded {} user(s) from {}", users.len(), path.display());
        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    fn persist(&self, users: &BTreeMap<String, User>) -> AppResult<()> {
        let list: Vec<&User> = users.values().collect();
        let raw = serde_json::to_string_pretty(&list)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.username.clone(), user.clone());
        if let Err(e) = self.persist(&users) {
            users.remove(&user.username);
            return Err(e);
        }
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.users.read().await.len())
    }
}

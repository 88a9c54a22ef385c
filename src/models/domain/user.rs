use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user with a fresh random salt.
    pub fn new(username: &str, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        User {
            username: username.to_string(),
            password_hash: hash_password(password, &salt),
            salt,
            created_at: Some(Utc::now()),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(password, &self.salt) == self.password_hash
    }
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str) -> Self {
        User::new(username, "password123")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("johndoe", "hunter22");
        assert_eq!(user.username, "johndoe");
        assert!(user.created_at.is_some());
        assert_ne!(user.password_hash, "hunter22");
        assert_eq!(user.password_hash.len(), 64);
    }

    #[test]
    fn test_verify_password() {
        let user = User::new("johndoe", "hunter22");
        assert!(user.verify_password("hunter22"));
        assert!(!user.verify_password("hunter23"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = User::new("a", "same");
        let b = User::new("b", "same");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[test]
    fn test_hash_password_consistency() {
        let first = hash_password("secret", "salt");
        let second = hash_password("secret", "salt");
        assert_eq!(first, second);
        assert_ne!(first, hash_password("secret", "pepper"));
    }
}

//! User records and credential payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// User row as stored. Never serialized: the hash stays server-side.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
        }
    }
}

/// Body of `/register` and `/login`
#[derive(Debug, Clone, Deserialize)]
pub struct UserCredentials {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserCredentials {
    /// The supplied password, rejecting absent and empty values.
    pub fn password(&self) -> Result<&str, ValidationError> {
        match self.password.as_deref() {
            Some(p) if !p.is_empty() => Ok(p),
            _ => Err(ValidationError::Missing { field: "password" }),
        }
    }
}

/// Body of `/delete-user`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_passwords_rejected() {
        let creds: UserCredentials = serde_json::from_str(r#"{"username": "John1"}"#).unwrap();
        assert_eq!(
            creds.password().unwrap_err(),
            ValidationError::Missing { field: "password" }
        );

        let creds: UserCredentials =
            serde_json::from_str(r#"{"username": "John1", "password": ""}"#).unwrap();
        assert!(creds.password().is_err());
    }

    #[test]
    fn password_present() {
        let creds: UserCredentials =
            serde_json::from_str(r#"{"username": "John", "password": "John@1234"}"#).unwrap();
        assert_eq!(creds.password().unwrap(), "John@1234");
    }

    #[test]
    fn view_drops_hash() {
        let view = UserView::from(User {
            id: 2,
            username: "John".into(),
            password_hash: "$argon2id$...".into(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({"id": 2, "username": "John"}));
    }
}

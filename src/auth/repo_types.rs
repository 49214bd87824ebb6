use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record. On a candidate the password is plaintext; once stored it is
/// always an Argon2 digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(default)]
    pub id: i64,       // assigned by storage, 0 until persisted
    pub email: String, // unique
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Candidate record built from client input, not yet persisted.
    pub fn candidate(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

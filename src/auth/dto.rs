use serde::{Deserialize, Serialize};

use crate::auth::repo_types::User;

/// Request body for signup and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl From<CredentialsRequest> for User {
    fn from(req: CredentialsRequest) -> Self {
        User::candidate(req.email, req.password)
    }
}

/// Response returned after login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

use serde::{Deserialize, Serialize};

/// JWT payload. Nothing beyond the user id and expiry is embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64, // user ID
    pub exp: i64,     // expires at (unix timestamp)
}

use serde::{Deserialize, Serialize};

/// The staff account that may reach the administration pages.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Answer of `POST auth/login/`. Only the access token is kept by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(alias = "access_token")]
    pub access: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh: Option<String>,
}

/// Answer of `GET auth/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}

pub fn is_admin_identity(username: &str) -> bool {
    username == ADMIN_USERNAME
}

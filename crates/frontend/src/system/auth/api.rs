use contracts::system::auth::{LoginRequest, TokenPair, UserInfo};

use super::storage;
use crate::shared::http::{self, ApiError};

/// Exchange credentials for a token pair. The access token and the username
/// are persisted to sessionStorage on success.
pub async fn login(username: String, password: String) -> Result<TokenPair, ApiError> {
    let request = LoginRequest {
        username: username.clone(),
        password,
    };
    let tokens: TokenPair =
        http::post_json_anonymous("auth/login/", &request, "Login failed").await?;

    storage::save_token(&tokens.access);
    storage::save_username(&username);
    log::info!("signed in as {}", username);
    Ok(tokens)
}

/// Forget the stored session. Tokens are not revoked server-side.
pub fn logout() {
    storage::clear_session();
}

/// Identity behind the stored token.
pub async fn who_am_i() -> Result<UserInfo, ApiError> {
    http::get_json("auth/me/", "Failed to fetch current user").await
}

use web_sys::window;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Save access token to sessionStorage
pub fn save_token(token: &str) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

/// Get access token from sessionStorage
pub fn get_token() -> Option<String> {
    get_session_storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn save_username(username: &str) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.set_item(USERNAME_KEY, username);
    }
}

pub fn get_username() -> Option<String> {
    get_session_storage()?.get_item(USERNAME_KEY).ok()?
}

/// Clear token and username
pub fn clear_session() {
    if let Some(storage) = get_session_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USERNAME_KEY);
    }
}

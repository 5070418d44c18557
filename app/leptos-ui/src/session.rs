//! Durable session storage: auth token, user profile, and theme preference
//! live in `window.localStorage` and survive page reloads.
//!
//! Storage access can fail (no window, storage disabled); every operation
//! degrades to a no-op or `None` rather than erroring, so callers treat an
//! unreadable session the same as a missing one.

use hub_api_types::ApiUser;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const THEME_KEY: &str = "theme";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok().flatten()
}

pub fn set_token(token: &str) {
    if let Some(s) = storage() {
        s.set_item(TOKEN_KEY, token).ok();
    }
}

pub fn user() -> Option<ApiUser> {
    let raw = storage()?.get_item(USER_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn set_user(user: &ApiUser) {
    if let (Some(s), Ok(json)) = (storage(), serde_json::to_string(user)) {
        s.set_item(USER_KEY, &json).ok();
    }
}

/// Remove token and profile together. A session with only one of the two is
/// treated as no session at all, so they are always cleared as a pair.
pub fn clear() {
    if let Some(s) = storage() {
        s.remove_item(TOKEN_KEY).ok();
        s.remove_item(USER_KEY).ok();
    }
}

pub fn theme() -> Option<String> {
    storage()?.get_item(THEME_KEY).ok().flatten()
}

pub fn set_theme(theme: &str) {
    if let Some(s) = storage() {
        s.set_item(THEME_KEY, theme).ok();
    }
}

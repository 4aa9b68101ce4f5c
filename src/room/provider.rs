//! Client bootstrap for the video SDK and the email cookie that mirrors the
//! signed-in user.
//!
//! The cookie only drives button visibility on the client; the server never
//! trusts it for anything but the same allow-list comparison it performs
//! itself on gated endpoints.

use serde::Serialize;

pub const USER_EMAIL_COOKIE: &str = "user_email_manual";
pub const EMAIL_COOKIE_TTL_DAYS: i64 = 7;

/// A signed-in user as reported by the auth provider.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub id: String,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
}

/// What the video client needs to come up for a signed-in user.
#[derive(Debug, Clone, Serialize)]
pub struct VideoClientConfig {
    pub api_key: String,
    pub user_id: String,
    pub user_name: String,
    pub user_image: Option<String>,
}

pub fn video_client_config(api_key: &str, user: &SignedInUser) -> VideoClientConfig {
    VideoClientConfig {
        api_key: api_key.to_string(),
        user_id: user.id.clone(),
        user_name: user.username.clone().unwrap_or_else(|| user.id.clone()),
        user_image: user.image_url.clone(),
    }
}

/// Planned change to the email mirror cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieOp {
    Set { value: String, ttl_days: i64 },
    Clear,
    Keep,
}

/// Decide what to do with the email cookie given the signed-in state and the
/// cookie's current value. Set when stale or absent, clear on sign-out,
/// otherwise leave it alone.
pub fn plan_email_cookie(signed_in_email: Option<&str>, current_value: Option<&str>) -> CookieOp {
    match (signed_in_email, current_value) {
        (Some(email), Some(current)) if email == current => CookieOp::Keep,
        (Some(email), _) => CookieOp::Set {
            value: email.to_string(),
            ttl_days: EMAIL_COOKIE_TTL_DAYS,
        },
        (None, Some(_)) => CookieOp::Clear,
        (None, None) => CookieOp::Keep,
    }
}

/// Pull a named cookie's value out of a `Cookie` request header.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Host gate: true only when an allow-listed email is configured and the
/// presented email matches it exactly.
pub fn is_allowed_host(email: Option<&str>, allowed: Option<&str>) -> bool {
    match (email, allowed) {
        (Some(email), Some(allowed)) => email == allowed,
        _ => false,
    }
}

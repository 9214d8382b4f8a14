//! Bearer token inspection.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Read the `exp` claim of a JWT without verifying it.
///
/// Returns `None` for opaque tokens or tokens without an expiry.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&decoded).ok()?;
    Utc.timestamp_opt(claims.exp, 0).single()
}

/// True only when the token carries an expiry that is already in the past.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    token_expiry(token).is_some_and(|exp| exp <= now)
}

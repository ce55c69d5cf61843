//! Invite-link tokens.
//!
//! Only the SHA-256 hex digest of a token is ever stored; the plaintext is
//! handed out once inside the generated URL.

use chrono::Duration;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// The only accepted value of the `mode` query parameter.
pub const LINK_MODE: &str = "link";

/// Generate a new token, returning `(plaintext, sha256_hex)`.
pub fn generate_token() -> (String, String) {
    let plaintext = Uuid::new_v4().simple().to_string();
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the link handed to the employee: `base?mode=link&token=<token>`.
pub fn build_link(base_url: &str, token: &str) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}mode={LINK_MODE}&token={token}")
}

/// Expiry timestamp for a link created at `created_at`.
pub fn expires_at(created_at: Timestamp, ttl_days: i64) -> Timestamp {
    created_at + Duration::days(ttl_days)
}

/// Query parameters carried by an invite link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkParams {
    pub mode: Option<String>,
    pub token: Option<String>,
}

impl LinkParams {
    /// Check the mode flag and return the non-empty token.
    pub fn token(&self) -> Result<&str, CoreError> {
        if self.mode.as_deref() != Some(LINK_MODE) {
            return Err(CoreError::Validation(format!(
                "Query parameter 'mode' must be '{LINK_MODE}'"
            )));
        }
        match self.token.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(CoreError::Validation(
                "Query parameter 'token' is required".to_string(),
            )),
        }
    }
}

/// Why a stored link can no longer be used.
pub fn check_usable(
    consumed_at: Option<Timestamp>,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if consumed_at.is_some() {
        return Err(CoreError::Conflict(
            "This survey link has already been used".to_string(),
        ));
    }
    if now >= expires_at {
        return Err(CoreError::Conflict("This survey link has expired".to_string()));
    }
    Ok(())
}

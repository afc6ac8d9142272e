//! Mock authentication.
//!
//! The signed-in user lives under its own storage key, next to the snapshot.
//! The first check signs in the configured default user; `logout` removes
//! the entry. There are no credentials: every check succeeds.

use crate::error::Result;
use crate::store::backend::StorageBackend;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Return the signed-in user, signing in `default_user` if nobody is.
///
/// An unreadable entry is replaced by `default_user`.
pub fn current_user<B: StorageBackend>(
    backend: &B,
    session_key: &str,
    default_user: &CurrentUser,
) -> Result<CurrentUser> {
    if let Some(raw) = backend.read(session_key)? {
        match serde_json::from_str::<CurrentUser>(&raw) {
            Ok(user) => return Ok(user),
            Err(e) => warn!(key = %session_key, error = %e, "corrupted session entry, signing in again"),
        }
    }

    backend.write(session_key, &serde_json::to_string(default_user)?)?;
    debug!(key = %session_key, user = %default_user.id, "signed in default user");
    Ok(default_user.clone())
}

pub fn is_authenticated<B: StorageBackend>(backend: &B, session_key: &str) -> Result<bool> {
    Ok(backend.read(session_key)?.is_some())
}

pub fn logout<B: StorageBackend>(backend: &B, session_key: &str) -> Result<()> {
    backend.remove(session_key)?;
    debug!(key = %session_key, "signed out");
    Ok(())
}

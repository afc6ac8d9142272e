use crate::auth::{self, CurrentUser};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;

pub fn whoami<B: StorageBackend>(
    backend: &B,
    session_key: &str,
    default_user: &CurrentUser,
) -> Result<CmdResult> {
    let user = auth::current_user(backend, session_key, default_user)?;
    Ok(CmdResult::default().with_user(user))
}

pub fn logout<B: StorageBackend>(backend: &B, session_key: &str) -> Result<CmdResult> {
    let was_signed_in = auth::is_authenticated(backend, session_key)?;
    auth::logout(backend, session_key)?;

    let mut result = CmdResult::default();
    if was_signed_in {
        result.add_message(CmdMessage::success("Signed out"));
    } else {
        result.add_message(CmdMessage::info("Nobody was signed in"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::CatedraConfig;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn whoami_then_logout() {
        let backend = MemBackend::new();
        let config = CatedraConfig::default();

        let result = whoami(&backend, &config.session_key, &config.default_user()).unwrap();
        assert_eq!(result.user.unwrap().email, config.user_email);

        let out = logout(&backend, &config.session_key).unwrap();
        assert_eq!(out.messages[0].level, MessageLevel::Success);

        let again = logout(&backend, &config.session_key).unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Info);
    }
}

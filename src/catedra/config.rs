use crate::auth::CurrentUser;
use crate::error::{CatedraError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
/// Storage key that would land on the config file itself.
const RESERVED_KEY: &str = "config";
const DEFAULT_SNAPSHOT_KEY: &str = "catedra_data";
const DEFAULT_SESSION_KEY: &str = "catedra_current_user";
const DEFAULT_USER_EMAIL: &str = "admin@catedra.local";
const DEFAULT_USER_NAME: &str = "Administración";

/// Keys accepted by `config`, in display order.
pub const CONFIG_KEYS: [&str; 4] = ["snapshot-key", "session-key", "user-email", "user-name"];

/// Configuration for catedra, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatedraConfig {
    /// Storage key holding the content snapshot
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,

    /// Storage key holding the signed-in user
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Email of the user signed in by default
    #[serde(default = "default_user_email")]
    pub user_email: String,

    /// Display name of the user signed in by default
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

fn default_user_email() -> String {
    DEFAULT_USER_EMAIL.to_string()
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

impl Default for CatedraConfig {
    fn default() -> Self {
        Self {
            snapshot_key: default_snapshot_key(),
            session_key: default_session_key(),
            user_email: default_user_email(),
            user_name: default_user_name(),
        }
    }
}

impl CatedraConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CatedraError::Io)?;
        let config: CatedraConfig =
            serde_json::from_str(&content).map_err(CatedraError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CatedraError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CatedraError::Serialization)?;
        fs::write(config_path, content).map_err(CatedraError::Io)?;
        Ok(())
    }

    /// The user the mock auth signs in.
    pub fn default_user(&self) -> CurrentUser {
        CurrentUser {
            id: "admin".to_string(),
            email: self.user_email.clone(),
            name: self.user_name.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        match key {
            "snapshot-key" => Ok(&self.snapshot_key),
            "session-key" => Ok(&self.session_key),
            "user-email" => Ok(&self.user_email),
            "user-name" => Ok(&self.user_name),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CatedraError::InvalidInput(format!(
                "Value for {} cannot be empty",
                key
            )));
        }
        let mut updated = self.clone();
        let slot = match key {
            "snapshot-key" => &mut updated.snapshot_key,
            "session-key" => &mut updated.session_key,
            "user-email" => &mut updated.user_email,
            "user-name" => &mut updated.user_name,
            other => return Err(unknown_key(other)),
        };
        *slot = value.to_string();
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// The snapshot and session must live under distinct storage keys, and
    /// neither may shadow the config file.
    pub fn validate(&self) -> Result<()> {
        for (name, key) in [
            ("snapshot-key", &self.snapshot_key),
            ("session-key", &self.session_key),
        ] {
            if key == RESERVED_KEY {
                return Err(CatedraError::InvalidInput(format!(
                    "{} cannot be '{}', that key holds the configuration",
                    name, RESERVED_KEY
                )));
            }
        }
        if self.snapshot_key == self.session_key {
            return Err(CatedraError::InvalidInput(format!(
                "snapshot-key and session-key must differ (both are '{}')",
                self.snapshot_key
            )));
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> CatedraError {
    CatedraError::InvalidInput(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatedraConfig::default();
        assert_eq!(config.snapshot_key, "catedra_data");
        assert_eq!(config.session_key, "catedra_current_user");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatedraConfig::load(temp_dir.path().join("missing")).unwrap();
        assert_eq!(config, CatedraConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested");

        let mut config = CatedraConfig::default();
        config.set("user-name", "María").unwrap();
        config.save(&dir).unwrap();

        let loaded = CatedraConfig::load(&dir).unwrap();
        assert_eq!(loaded.user_name, "María");
        assert_eq!(loaded.default_user().name, "María");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"snapshot_key": "otra"}"#,
        )
        .unwrap();

        let config = CatedraConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.snapshot_key, "otra");
        assert_eq!(config.session_key, "catedra_current_user");
    }

    #[test]
    fn test_storage_keys_cannot_shadow_config_file() {
        let mut config = CatedraConfig::default();
        assert!(config.set("snapshot-key", "config").is_err());
        assert!(config.set("session-key", " config ").is_err());
        assert_eq!(config, CatedraConfig::default());
    }

    #[test]
    fn test_storage_keys_must_differ() {
        let mut config = CatedraConfig::default();
        assert!(config.set("snapshot-key", "catedra_current_user").is_err());
        assert!(config.set("session-key", "catedra_data").is_err());
        assert_eq!(config.snapshot_key, "catedra_data");

        config.set("snapshot-key", "sitio").unwrap();
        config.set("session-key", "catedra_data").unwrap();
    }

    #[test]
    fn test_load_rejects_clashing_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"snapshot_key": "config"}"#,
        )
        .unwrap();
        assert!(CatedraConfig::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = CatedraConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_ok());
        }
        config.set("snapshot-key", "site").unwrap();
        assert_eq!(config.get("snapshot-key").unwrap(), "site");
        assert!(config.set("bogus", "x").is_err());
        assert!(config.set("user-email", "  ").is_err());
    }
}

//! Startup configuration: secret-source-then-environment resolution.
//!
//! Everything the core needs is resolved once, before the server starts, into
//! an owned [`Settings`] value. A missing mandatory value is a fatal
//! [`ConfigError`]; `main` propagates it and the process exits non-zero
//! without serving a single request.

use crate::error::ConfigError;
use std::collections::HashMap;

pub const DATABASE_NAME: &str = "DATABASE_NAME";
pub const DATABASE_COLLECTION: &str = "DATABASE_COLLECTION";
pub const STORE_URL: &str = "STORE_URL";
pub const STORE_KEY: &str = "STORE_KEY";

/// Secret lookup seam. The production collaborator is a vault client; the
/// in-crate implementation reads process environment variables, which doubles
/// as the graceful fallback when no vault is configured.
pub trait SecretSource {
    /// Returns the secret, or `None` when the source does not hold it.
    fn get_secret(&self, name: &str) -> Option<String>;
}

/// Environment-variable-backed secret source.
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn get_secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_name: String,
    pub collection_name: String,
    pub store_url: String,
    pub store_key: String,
}

impl Settings {
    /// Resolve from the process environment, consulting the secret source for
    /// the store access key first.
    pub fn from_env(secrets: &dyn SecretSource) -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(secrets, &vars)
    }

    /// Pure resolution over an explicit variable map.
    pub fn resolve(
        secrets: &dyn SecretSource,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let get = |name: &'static str| -> Result<String, ConfigError> {
            vars.get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(ConfigError::Missing(name))
        };

        // The key may live in the vault; fall back to the environment.
        let store_key = secrets
            .get_secret(STORE_KEY)
            .or_else(|| vars.get(STORE_KEY).filter(|v| !v.is_empty()).cloned())
            .ok_or(ConfigError::Missing(STORE_KEY))?;

        Ok(Settings {
            database_name: get(DATABASE_NAME)?,
            collection_name: get(DATABASE_COLLECTION)?,
            store_url: get(STORE_URL)?,
            store_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSecrets;
    impl SecretSource for NoSecrets {
        fn get_secret(&self, _name: &str) -> Option<String> {
            None
        }
    }

    struct FixedSecret(&'static str);
    impl SecretSource for FixedSecret {
        fn get_secret(&self, name: &str) -> Option<String> {
            (name == STORE_KEY).then(|| self.0.to_string())
        }
    }

    fn full_vars() -> HashMap<String, String> {
        [
            (DATABASE_NAME, "imdb"),
            (DATABASE_COLLECTION, "media"),
            (STORE_URL, "mongodb://localhost:27017"),
            (STORE_KEY, "env-key"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn resolves_all_values() {
        let settings = Settings::resolve(&NoSecrets, &full_vars()).unwrap();
        assert_eq!(settings.database_name, "imdb");
        assert_eq!(settings.collection_name, "media");
        assert_eq!(settings.store_key, "env-key");
    }

    #[test]
    fn secret_source_wins_over_environment() {
        let settings = Settings::resolve(&FixedSecret("vault-key"), &full_vars()).unwrap();
        assert_eq!(settings.store_key, "vault-key");
    }

    #[test]
    fn missing_mandatory_value_is_fatal() {
        let mut vars = full_vars();
        vars.remove(STORE_URL);
        let err = Settings::resolve(&NoSecrets, &vars).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(STORE_URL)));
    }

    #[test]
    fn key_falls_back_to_environment_when_vault_is_empty() {
        let settings = Settings::resolve(&NoSecrets, &full_vars()).unwrap();
        assert_eq!(settings.store_key, "env-key");

        let mut vars = full_vars();
        vars.remove(STORE_KEY);
        assert!(Settings::resolve(&NoSecrets, &vars).is_err());
    }
}

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    helpers::read_optional_env_var,
};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_NAMESPACE: &str = "materializer";

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub credentials: Option<Credentials>,
    pub namespace: String,
    pub database: String,
}

#[derive(Deserialize, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Builds the configuration from `DB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(read_optional_env_var)
    }

    /// Builds the configuration from variables resolved through `lookup`.
    ///
    /// Blank values count as unset. `DB_ENDPOINT` wins over `DB_HOST`/`DB_PORT`
    /// and accepts any scheme the database client understands, including
    /// `mem://` for an embedded store.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &str| optional(name).ok_or_else(|| Error::MissingEnv { name: name.into() });

        let endpoint = match optional("DB_ENDPOINT") {
            Some(endpoint) => endpoint,
            None => {
                let host = optional("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
                let port = optional("DB_PORT").unwrap_or_else(|| DEFAULT_PORT.into());
                if port.trim().parse::<u16>().is_err() {
                    return Err(Error::InvalidEnv {
                        name: "DB_PORT".into(),
                        value: port,
                    });
                }
                format!("ws://{host}:{}", port.trim())
            }
        };

        let credentials = match optional("DB_USER") {
            Some(username) => Some(Credentials {
                username,
                password: required("DB_PASSWORD")?,
            }),
            None => None,
        };

        Ok(Config {
            endpoint,
            credentials,
            namespace: optional("DB_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.into()),
            database: required("DB_DATABASE")?,
        })
    }

    /// An embedded in-memory store, handy for trying the tool without a server.
    pub fn in_memory(database: &str) -> Self {
        Config {
            endpoint: "mem://".into(),
            credentials: None,
            namespace: DEFAULT_NAMESPACE.into(),
            database: database.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_is_set() {
        let config = from_vars(&[("DB_DATABASE", "sensors")]).unwrap();
        assert_eq!(
            config,
            Config {
                endpoint: "ws://localhost:8000".into(),
                credentials: None,
                namespace: "materializer".into(),
                database: "sensors".into(),
            }
        );
    }

    #[test]
    fn host_port_and_namespace_are_read() {
        let config = from_vars(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "9001"),
            ("DB_NAMESPACE", "plant"),
            ("DB_DATABASE", "sensors"),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "ws://db.internal:9001");
        assert_eq!(config.namespace, "plant");
    }

    #[test]
    fn endpoint_overrides_host_and_port() {
        let config = from_vars(&[
            ("DB_ENDPOINT", "mem://"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "not-a-port"),
            ("DB_DATABASE", "sensors"),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "mem://");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = from_vars(&[("DB_PORT", "80000"), ("DB_DATABASE", "sensors")]).unwrap_err();
        match err {
            Error::InvalidEnv { name, value } => {
                assert_eq!(name, "DB_PORT");
                assert_eq!(value, "80000");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn user_requires_password() {
        let err = from_vars(&[("DB_USER", "root"), ("DB_DATABASE", "sensors")]).unwrap_err();
        assert!(matches!(&err, Error::MissingEnv { name } if name == "DB_PASSWORD"));

        let config = from_vars(&[
            ("DB_USER", "root"),
            ("DB_PASSWORD", "secret"),
            ("DB_DATABASE", "sensors"),
        ])
        .unwrap();
        assert_eq!(
            config.credentials,
            Some(Credentials {
                username: "root".into(),
                password: "secret".into(),
            })
        );
    }

    #[test]
    fn no_user_means_no_sign_in() {
        let config = from_vars(&[("DB_PASSWORD", "secret"), ("DB_DATABASE", "sensors")]).unwrap();
        assert!(config.credentials.is_none());
    }

    #[test]
    fn database_is_required_and_blank_counts_as_unset() {
        let err = from_vars(&[]).unwrap_err();
        assert!(matches!(&err, Error::MissingEnv { name } if name == "DB_DATABASE"));

        let err = from_vars(&[("DB_DATABASE", "  ")]).unwrap_err();
        assert!(matches!(&err, Error::MissingEnv { name } if name == "DB_DATABASE"));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "root".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("root"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn in_memory_uses_embedded_endpoint() {
        let config = Config::in_memory("view");
        assert_eq!(config.endpoint, "mem://");
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.database, "view");
        assert!(config.credentials.is_none());
    }
}

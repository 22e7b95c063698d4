//! Process configuration read from the environment.
//!
//! The environment is read exactly once, at startup, into an immutable
//! [`ConnectorSettings`]. Nothing else in the crate looks at environment
//! variables; loaders take a [`mockable::Env`] so they can be tested in
//! isolation.

use std::net::SocketAddr;

use mockable::Env;
use tracing::warn;

use crate::domain::Secret;
use crate::domain::directory::{DirectorySettings, Scheme};
use crate::domain::ports::EdgeProxyCredentials;

/// Shared secret used to verify request signatures.
pub const SIGNING_SECRET_ENV: &str = "OPAL_SIGNING_SECRET";
/// Directory API token.
pub const TOKEN_ENV: &str = "AUTHENTIK_TOKEN";
/// Directory host, optionally with a port.
pub const HOST_ENV: &str = "AUTHENTIK_HOST";
/// Directory URL scheme.
pub const SCHEME_ENV: &str = "AUTHENTIK_SCHEME";
/// Access-proxy client id.
pub const EDGE_CLIENT_ID_ENV: &str = "CF_ACCESS_CLIENT_ID";
/// Access-proxy client secret.
pub const EDGE_CLIENT_SECRET_ENV: &str = "CF_ACCESS_CLIENT_SECRET";
/// Listener address.
pub const BIND_ADDR_ENV: &str = "CONNECTOR_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SCHEME_EXPECTED: &str = "http|https";
const BIND_ADDR_EXPECTED: &str = "host:port socket address";

/// Everything the connector needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSettings {
    /// Secret shared with the orchestrator for request signatures.
    pub signing_secret: Secret,
    /// Directory connection settings.
    pub directory: DirectorySettings,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Only one of the two access-proxy variables is set.
    #[error("{present} is set but {missing} is not; set both or neither")]
    PartialEdgeProxy {
        present: &'static str,
        missing: &'static str,
    },
}

/// Build connector settings from environment variables.
///
/// # Errors
/// Returns [`ConfigError`] when a required variable is missing, a value is
/// malformed, or only half of the access-proxy credentials are present.
///
/// # Examples
///
/// ```rust
/// use authentik_connector::config::settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "OPAL_SIGNING_SECRET" => Some("shh".to_string()),
///     "AUTHENTIK_TOKEN" => Some("ak-token".to_string()),
///     "AUTHENTIK_HOST" => Some("auth.example.com".to_string()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env).expect("valid configuration");
/// assert_eq!(settings.bind_addr.port(), 8080);
/// ```
pub fn settings_from_env<E: Env>(env: &E) -> Result<ConnectorSettings, ConfigError> {
    let signing_secret = Secret::new(required(env, SIGNING_SECRET_ENV)?);
    let directory = directory_from_env(env)?;
    let bind_addr = bind_addr_from_env(env)?;
    Ok(ConnectorSettings {
        signing_secret,
        directory,
        bind_addr,
    })
}

fn directory_from_env<E: Env>(env: &E) -> Result<DirectorySettings, ConfigError> {
    let token = Secret::new(required(env, TOKEN_ENV)?);
    let host = required(env, HOST_ENV)?;
    let scheme = scheme_from_env(env)?;
    let edge_proxy = edge_proxy_from_env(env)?;
    let settings = DirectorySettings {
        token,
        host,
        scheme,
        edge_proxy,
    };
    settings
        .api_base_url()
        .map_err(|_| ConfigError::InvalidEnv {
            name: HOST_ENV,
            value: settings.host.clone(),
            expected: "host[:port]",
        })?;
    Ok(settings)
}

fn scheme_from_env<E: Env>(env: &E) -> Result<Scheme, ConfigError> {
    match optional(env, SCHEME_ENV) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: SCHEME_ENV,
            value,
            expected: SCHEME_EXPECTED,
        }),
        None => Ok(Scheme::default()),
    }
}

fn edge_proxy_from_env<E: Env>(env: &E) -> Result<Option<EdgeProxyCredentials>, ConfigError> {
    match (
        optional(env, EDGE_CLIENT_ID_ENV),
        optional(env, EDGE_CLIENT_SECRET_ENV),
    ) {
        (Some(client_id), Some(client_secret)) => Ok(Some(EdgeProxyCredentials {
            client_id,
            client_secret: Secret::new(client_secret),
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::PartialEdgeProxy {
            present: EDGE_CLIENT_ID_ENV,
            missing: EDGE_CLIENT_SECRET_ENV,
        }),
        (None, Some(_)) => Err(ConfigError::PartialEdgeProxy {
            present: EDGE_CLIENT_SECRET_ENV,
            missing: EDGE_CLIENT_ID_ENV,
        }),
    }
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ConfigError> {
    let value = optional(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: BIND_ADDR_EXPECTED,
    })
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    optional(env, name).ok_or(ConfigError::MissingEnv { name })
}

/// Blank values count as unset.
fn optional<E: Env>(env: &E, name: &'static str) -> Option<String> {
    let value = env.string(name)?;
    if value.trim().is_empty() {
        warn!(variable = name, "ignoring blank environment variable");
        None
    } else {
        Some(value.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    fn mock_env(vars: HashMap<String, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[fixture]
    fn minimal() -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(SIGNING_SECRET_ENV.to_owned(), "shh".to_owned());
        vars.insert(TOKEN_ENV.to_owned(), "ak-token".to_owned());
        vars.insert(HOST_ENV.to_owned(), "auth.example.com".to_owned());
        vars
    }

    fn load(vars: HashMap<String, String>) -> Result<ConnectorSettings, ConfigError> {
        settings_from_env(&mock_env(vars))
    }

    #[rstest]
    fn minimal_environment_uses_defaults(minimal: HashMap<String, String>) {
        let settings = load(minimal).expect("settings");
        assert_eq!(settings.signing_secret.expose(), "shh");
        assert_eq!(settings.directory.token.expose(), "ak-token");
        assert_eq!(settings.directory.scheme, Scheme::Https);
        assert!(settings.directory.edge_proxy.is_none());
        assert_eq!(settings.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
    }

    #[rstest]
    #[case(SIGNING_SECRET_ENV)]
    #[case(TOKEN_ENV)]
    #[case(HOST_ENV)]
    fn required_variables_must_be_present(
        mut minimal: HashMap<String, String>,
        #[case] name: &'static str,
    ) {
        minimal.remove(name);
        assert_eq!(load(minimal), Err(ConfigError::MissingEnv { name }));
    }

    #[rstest]
    fn blank_token_counts_as_missing(mut minimal: HashMap<String, String>) {
        minimal.insert(TOKEN_ENV.to_owned(), "   ".to_owned());
        assert_eq!(
            load(minimal),
            Err(ConfigError::MissingEnv { name: TOKEN_ENV })
        );
    }

    #[rstest]
    fn scheme_and_bind_address_are_overridable(mut minimal: HashMap<String, String>) {
        minimal.insert(SCHEME_ENV.to_owned(), "http".to_owned());
        minimal.insert(BIND_ADDR_ENV.to_owned(), "127.0.0.1:9000".to_owned());
        let settings = load(minimal).expect("settings");
        assert_eq!(settings.directory.scheme, Scheme::Http);
        assert_eq!(settings.bind_addr.port(), 9000);
    }

    #[rstest]
    #[case(SCHEME_ENV, "gopher")]
    #[case(BIND_ADDR_ENV, "not-an-address")]
    #[case(HOST_ENV, "bad host")]
    fn malformed_values_are_rejected(
        mut minimal: HashMap<String, String>,
        #[case] name: &'static str,
        #[case] value: &str,
    ) {
        minimal.insert(name.to_owned(), value.to_owned());
        let err = load(minimal).expect_err("invalid value");
        assert!(matches!(err, ConfigError::InvalidEnv { name: found, .. } if found == name));
    }

    #[rstest]
    fn edge_proxy_credentials_are_read_together(mut minimal: HashMap<String, String>) {
        minimal.insert(EDGE_CLIENT_ID_ENV.to_owned(), "cf-id".to_owned());
        minimal.insert(EDGE_CLIENT_SECRET_ENV.to_owned(), "cf-secret".to_owned());
        let proxy = load(minimal)
            .expect("settings")
            .directory
            .edge_proxy
            .expect("edge proxy");
        assert_eq!(proxy.client_id, "cf-id");
        assert_eq!(proxy.client_secret.expose(), "cf-secret");
    }

    #[rstest]
    #[case(EDGE_CLIENT_ID_ENV, EDGE_CLIENT_SECRET_ENV)]
    #[case(EDGE_CLIENT_SECRET_ENV, EDGE_CLIENT_ID_ENV)]
    fn half_configured_edge_proxy_is_rejected(
        mut minimal: HashMap<String, String>,
        #[case] present: &'static str,
        #[case] missing: &'static str,
    ) {
        minimal.insert(present.to_owned(), "value".to_owned());
        assert_eq!(
            load(minimal),
            Err(ConfigError::PartialEdgeProxy { present, missing })
        );
    }
}

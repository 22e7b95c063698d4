//! Immutable directory connection settings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::domain::Secret;
use crate::domain::ports::{AuthContext, EdgeProxyCredentials};

/// URL scheme used to reach the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Plain HTTP, for local development.
    Http,
    /// HTTPS.
    #[default]
    Https,
}

/// Raised when a scheme other than `http` or `https` is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported scheme `{0}`; expected `http` or `https`")]
pub struct SchemeParseError(String);

impl FromStr for Scheme {
    type Err = SchemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(SchemeParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Https => "https",
        })
    }
}

/// Everything needed to talk to the directory.
///
/// ## Invariants
/// - Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    /// API token sent as a bearer credential.
    pub token: Secret,
    /// Host, optionally with a port.
    pub host: String,
    /// URL scheme.
    pub scheme: Scheme,
    /// Optional access-proxy credentials.
    pub edge_proxy: Option<EdgeProxyCredentials>,
}

impl DirectorySettings {
    /// Root of the directory's versioned API, always ending in `/`.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when the host does not form a valid URL.
    ///
    /// # Examples
    /// ```
    /// use authentik_connector::domain::Secret;
    /// use authentik_connector::domain::directory::{DirectorySettings, Scheme};
    ///
    /// let settings = DirectorySettings {
    ///     token: Secret::new("token"),
    ///     host: "auth.example.com".into(),
    ///     scheme: Scheme::Https,
    ///     edge_proxy: None,
    /// };
    /// let url = settings.api_base_url().expect("valid url");
    /// assert_eq!(url.as_str(), "https://auth.example.com/api/v3/");
    /// ```
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        let host = self.host.trim().trim_end_matches('/');
        Url::parse(&format!("{}://{host}/api/v3/", self.scheme))
    }

    /// Credentials presented on every directory call.
    pub fn auth_context(&self) -> AuthContext {
        AuthContext {
            token: self.token.clone(),
            edge_proxy: self.edge_proxy.clone(),
        }
    }
}

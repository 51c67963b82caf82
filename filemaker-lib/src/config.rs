//! Connection settings and parse options

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;
use crate::error::Error;
use crate::model::Resultset;

const DEFAULT_HOST: &str = "localhost";
const HTTPS_PORT: u16 = 443;
const HTTP_PORT: u16 = 80;

/// Options that control how a response body becomes a [`Resultset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse portal metadata and related records.
    pub include_portals: bool,
    /// Treat code 401 (no records found) as an error instead of an empty
    /// resultset.
    pub raise_on_401: bool,
    /// Log every raw response body at `debug`.
    pub log_responses: bool,
    /// Base URL that container paths are resolved against.
    pub container_base: Option<Url>,
}

/// Immutable connection settings.
///
/// Build one with [`Config::builder`]. A `Config` never performs I/O
/// after construction; it only derives URLs and [`ParseOptions`].
///
/// # Example
///
/// ```
/// use filemaker_lib::Config;
///
/// let config = Config::builder()
///     .host("fm.example.com")
///     .ssl(false)
///     .account("web")
///     .password("secret")
///     .database("Contacts")
///     .include_portals(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.port(), 80);
/// assert_eq!(config.base_url().unwrap().as_str(), "http://fm.example.com/");
/// assert!(!format!("{:?}", config).contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    host: String,
    port: u16,
    ssl: bool,
    account: Option<String>,
    password: Option<String>,
    pem: Option<PathBuf>,
    database: Option<String>,
    default_layout: Option<String>,
    log_actions: bool,
    log_responses: bool,
    warn_on_redirect: bool,
    raise_on_401: bool,
    include_portals: bool,
}

impl Config {
    /// Creates a new builder with default settings.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the server host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the server port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` if requests use https.
    pub fn ssl(&self) -> bool {
        self.ssl
    }

    /// Returns the account name, if set.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Returns the password, if set.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the path of the trusted certificate file, if set.
    pub fn pem(&self) -> Option<&Path> {
        self.pem.as_deref()
    }

    /// Returns the default database, if set.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Returns the default layout, if set.
    ///
    /// [`QueryBuilder::from_config`](crate::api::query::QueryBuilder::from_config)
    /// targets this layout.
    pub fn default_layout(&self) -> Option<&str> {
        self.default_layout.as_deref()
    }

    /// Returns `true` if built request URLs are logged.
    pub fn log_actions(&self) -> bool {
        self.log_actions
    }

    /// Returns `true` if raw response bodies are logged.
    pub fn log_responses(&self) -> bool {
        self.log_responses
    }

    /// Returns `true` if the transport should warn when a request is
    /// redirected.
    ///
    /// This crate never follows redirects itself; the flag is carried for
    /// the caller's HTTP layer, alongside [`Config::account`],
    /// [`Config::password`] and [`Config::pem`].
    pub fn warn_on_redirect(&self) -> bool {
        self.warn_on_redirect
    }

    /// Returns `true` if code 401 is raised as an error.
    pub fn raise_on_401(&self) -> bool {
        self.raise_on_401
    }

    /// Returns `true` if portals are parsed.
    pub fn include_portals(&self) -> bool {
        self.include_portals
    }

    /// Returns `scheme://host:port/` for this server.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let scheme = if self.ssl { "https" } else { "http" };
        let raw = format!("{}://{}:{}/", scheme, self.host, self.port);
        Url::parse(&raw).map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })
    }

    /// Derives the options used to parse responses from this server.
    ///
    /// Container paths resolve against [`Config::base_url`]; if the host
    /// cannot form a URL they stay relative.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            include_portals: self.include_portals,
            raise_on_401: self.raise_on_401,
            log_responses: self.log_responses,
            container_base: self.base_url().ok(),
        }
    }

    /// Parses a response body with [`Config::parse_options`].
    pub fn parse_resultset(&self, xml: &str) -> Result<Resultset, Error> {
        Resultset::parse(xml, &self.parse_options())
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("ssl", &self.ssl)
            .field("account", &self.account)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("pem", &self.pem)
            .field("database", &self.database)
            .field("default_layout", &self.default_layout)
            .field("log_actions", &self.log_actions)
            .field("log_responses", &self.log_responses)
            .field("warn_on_redirect", &self.warn_on_redirect)
            .field("raise_on_401", &self.raise_on_401)
            .field("include_portals", &self.include_portals)
            .finish()
    }
}

/// Builder for constructing a [`Config`].
///
/// # Defaults
///
/// - `host`: `localhost`
/// - `port`: 443, or 80 when ssl is turned off and no other port was chosen
/// - `ssl`: on
/// - `warn_on_redirect`: on
/// - every other flag: off
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    host: String,
    port: u16,
    ssl: bool,
    account: Option<String>,
    password: Option<String>,
    pem: Option<PathBuf>,
    database: Option<String>,
    default_layout: Option<String>,
    log_actions: bool,
    log_responses: bool,
    warn_on_redirect: bool,
    raise_on_401: bool,
    include_portals: bool,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: HTTPS_PORT,
            ssl: true,
            account: None,
            password: None,
            pem: None,
            database: None,
            default_layout: None,
            log_actions: false,
            log_responses: false,
            warn_on_redirect: true,
            raise_on_401: false,
            include_portals: false,
        }
    }

    /// Sets the server host name.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Turns https on or off.
    pub fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Sets the account name.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets a trusted certificate file. Checked for existence in
    /// [`ConfigBuilder::build`].
    pub fn pem(mut self, path: impl Into<PathBuf>) -> Self {
        self.pem = Some(path.into());
        self
    }

    /// Sets the default database.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the default layout.
    pub fn default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = Some(layout.into());
        self
    }

    /// Logs every built request URL at `info`.
    pub fn log_actions(mut self, enabled: bool) -> Self {
        self.log_actions = enabled;
        self
    }

    /// Logs every raw response body at `debug`.
    pub fn log_responses(mut self, enabled: bool) -> Self {
        self.log_responses = enabled;
        self
    }

    /// Asks the transport to warn on redirects.
    pub fn warn_on_redirect(mut self, enabled: bool) -> Self {
        self.warn_on_redirect = enabled;
        self
    }

    /// Raises code 401 (no records found) as an error.
    pub fn raise_on_401(mut self, enabled: bool) -> Self {
        self.raise_on_401 = enabled;
        self
    }

    /// Parses portal metadata and related records.
    pub fn include_portals(mut self, enabled: bool) -> Self {
        self.include_portals = enabled;
        self
    }

    /// Builds the [`Config`].
    ///
    /// Fails if a pem file was given that does not exist.
    pub fn build(self) -> Result<Config, ConfigError> {
        if let Some(pem) = &self.pem {
            if !pem.is_file() {
                return Err(ConfigError::PemFileMissing(pem.clone()));
            }
        }

        Ok(self.finish())
    }

    fn finish(self) -> Config {
        let port = if !self.ssl && self.port == HTTPS_PORT {
            HTTP_PORT
        } else {
            self.port
        };

        Config {
            host: self.host,
            port,
            ssl: self.ssl,
            account: self.account,
            password: self.password,
            pem: self.pem,
            database: self.database,
            default_layout: self.default_layout,
            log_actions: self.log_actions,
            log_responses: self.log_responses,
            warn_on_redirect: self.warn_on_redirect,
            raise_on_401: self.raise_on_401,
            include_portals: self.include_portals,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 443);
        assert!(config.ssl());
        assert!(config.warn_on_redirect());
        assert!(!config.raise_on_401());
        assert!(!config.include_portals());
        assert!(!config.log_actions());
        assert!(config.database().is_none());
        assert_eq!(config, Config::builder().build().unwrap());
    }

    #[test]
    fn test_ssl_off_switches_port() {
        let config = Config::builder().ssl(false).build().unwrap();
        assert_eq!(config.port(), 80);

        let config = Config::builder().ssl(false).port(8080).build().unwrap();
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn test_base_url() {
        let config = Config::builder()
            .host("fm.example.com")
            .port(8443)
            .build()
            .unwrap();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://fm.example.com:8443/"
        );
    }

    #[test]
    fn test_invalid_host() {
        let config = Config::builder().host("bad host").build().unwrap();
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::InvalidHost { .. })
        ));
        assert!(config.parse_options().container_base.is_none());
    }

    #[test]
    fn test_missing_pem() {
        let err = Config::builder()
            .pem("/nonexistent/server.pem")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::PemFileMissing(_)));
    }

    #[test]
    fn test_existing_pem() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let config = Config::builder().pem(&path).build().unwrap();
        assert_eq!(config.pem(), Some(path.as_path()));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::builder()
            .account("admin")
            .password("hunter2")
            .build()
            .unwrap();
        let debug = format!("{:?}", config);

        assert!(debug.contains("admin"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(config.password(), Some("hunter2"));
    }

    #[test]
    fn test_parse_options() {
        let config = Config::builder()
            .host("fm.example.com")
            .raise_on_401(true)
            .include_portals(true)
            .log_responses(true)
            .build()
            .unwrap();
        let options = config.parse_options();

        assert!(options.raise_on_401);
        assert!(options.include_portals);
        assert!(options.log_responses);
        assert_eq!(
            options.container_base.map(|u| u.to_string()),
            Some("https://fm.example.com/".to_string())
        );
    }
}

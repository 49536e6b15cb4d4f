use std::time::Duration;

use config::{Config as ConfigLoader, Environment};
use is_terminal::IsTerminal;
use serde::Deserialize;

use crate::Error;

const PREFIX: &str = "IPQUERY";

pub const DEFAULT_BASE_URL: &str = "https://api.ipquery.io/";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    #[default]
    Auto,
    Always,
    Never,
}

impl LogStyle {
    pub fn is_color(&self) -> bool {
        match self {
            LogStyle::Auto => std::io::stderr().is_terminal(),
            LogStyle::Always => true,
            LogStyle::Never => false,
        }
    }
}

impl<'de> Deserialize<'de> for LogStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?.to_lowercase();
        match s.as_str() {
            "auto" => Ok(LogStyle::Auto),
            "always" => Ok(LogStyle::Always),
            "never" => Ok(LogStyle::Never),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["auto", "always", "never"],
            )),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Log {
    pub level: String,
    pub style: LogStyle,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Self::level(),
            style: LogStyle::default(),
        }
    }
}

impl Log {
    fn level() -> String {
        String::from("ipquery=info")
    }
}

/// HTTP backend used to reach the lookup service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Isahc,
    Reqwest,
}

impl<'de> Deserialize<'de> for Backend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?.to_lowercase();
        match s.as_str() {
            "isahc" => Ok(Backend::Isahc),
            "reqwest" => Ok(Backend::Reqwest),
            _ => Err(serde::de::Error::unknown_variant(&s, &["isahc", "reqwest"])),
        }
    }
}

/// Connection settings shared by every transport.
///
/// No timeout is applied unless one is configured; a call against a hung
/// peer blocks until the caller's own deadline, if any.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: None,
            connect_timeout_ms: None,
            user_agent: Self::user_agent(),
        }
    }
}

impl ClientConfig {
    fn user_agent() -> String {
        format!("ipquery/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(duration_ms(timeout));
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_ms(timeout));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub log: Log,
    pub client: ClientConfig,
    pub backend: Backend,
}

impl Settings {
    /// Reads `IPQUERY_*` variables, e.g. `IPQUERY_CLIENT__BASE_URL` or
    /// `IPQUERY_LOG__LEVEL`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_source(Environment::with_prefix(PREFIX))
    }

    fn from_source(source: Environment) -> Result<Self, Error> {
        let settings = ConfigLoader::builder()
            .add_source(
                source
                    .separator("__")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}

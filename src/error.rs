use config::ConfigError;
use isahc::Error as IsahcError;
use reqwest::Error as ReqwestError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transport Error: {0}")]
    Transport(#[source] BoxError),
    #[error("unexpected status code: {code}")]
    UnexpectedStatus { code: u16 },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to parse IP address : {0}")]
    AddrParse(String),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn unexpected_status(code: u16) -> Self {
        Self::UnexpectedStatus { code }
    }

    pub fn addr_parse_error(body: impl Into<String>) -> Self {
        Self::AddrParse(body.into())
    }

    /// Stable, machine readable name of the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport_error",
            Error::UnexpectedStatus { .. } => "unexpected_status",
            Error::Decode(_) => "decode_error",
            Error::AddrParse(_) => "addr_parse_error",
            Error::Config(_) => "config_error",
        }
    }

    /// HTTP status carried by [`Error::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { code } => Some(*code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<IsahcError> for Error {
    fn from(e: IsahcError) -> Self {
        Self::Transport(Box::new(e))
    }
}

impl From<ReqwestError> for Error {
    fn from(e: ReqwestError) -> Self {
        Self::Transport(Box::new(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Transport(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();

        assert_eq!(Error::from(io).code(), "transport_error");
        assert_eq!(Error::unexpected_status(503).code(), "unexpected_status");
        assert_eq!(Error::from(decode).code(), "decode_error");
        assert_eq!(Error::addr_parse_error("x").code(), "addr_parse_error");
    }

    #[test]
    fn status_only_for_unexpected_status() {
        assert_eq!(Error::unexpected_status(404).status(), Some(404));
        assert_eq!(Error::addr_parse_error("x").status(), None);
        assert_eq!(
            Error::unexpected_status(500).to_string(),
            "unexpected status code: 500"
        );
    }
}

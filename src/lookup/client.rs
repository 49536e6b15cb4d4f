use std::net::IpAddr;

use crate::transport::{IsahcTransport, ReqwestTransport, Transport};
use crate::{ClientConfig, Error, LookupResult};

use super::{JsonParser, PlainTextParser, ResponseParser};

/// Client for the remote lookup service.
///
/// Holds no mutable state: every call is one independent request against
/// `base_url`, so a single client can be shared across threads.
#[derive(Clone, Debug)]
pub struct Client<T = IsahcTransport> {
    base_url: String,
    transport: T,
}

impl Client {
    pub fn new() -> Result<Self, Error> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(
            &config.base_url,
            IsahcTransport::new(config)?,
        ))
    }
}

impl Client<ReqwestTransport> {
    pub fn reqwest(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(
            &config.base_url,
            ReqwestTransport::new(config)?,
        ))
    }
}

impl<T> Client<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Client<T> {
    /// Looks up `address`. The address is passed through untouched; the
    /// remote service decides whether it is valid.
    pub fn query_ip(&self, address: &str) -> Result<LookupResult, Error> {
        let url = format!("{}{}", self.base_url, address);
        self.fetch(&url, &JsonParser::default())
    }

    /// Returns the caller's public address exactly as the service sent it.
    pub fn query_own_ip(&self) -> Result<String, Error> {
        self.fetch(&self.base_url, &PlainTextParser)
    }

    /// Like [`Client::query_own_ip`], but parses the body into an address.
    pub fn query_own_addr(&self) -> Result<IpAddr, Error> {
        self.fetch(&self.base_url, &PlainTextParser)
    }

    fn fetch<R, P>(&self, url: &str, parser: &P) -> Result<R, Error>
    where
        P: ResponseParser<R>,
    {
        debug!("GET {}", url);
        let response = self.transport.get(url)?;
        if !response.is_ok() {
            warn!("{} answered with status {}", url, response.status);
            return Err(Error::unexpected_status(response.status));
        }
        parser.parse(&response.body)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::transport::RawResponse;

    /// Canned responses keyed by URL; records every URL it is asked for.
    #[derive(Default)]
    struct StaticTransport {
        responses: HashMap<String, RawResponse>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticTransport {
        fn with(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), RawResponse::new(status, body));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl Transport for StaticTransport {
        fn get(&self, url: &str) -> Result<RawResponse, Error> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses.get(url).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, url.to_string())
                    .into()
            })
        }
    }

    const BASE: &str = "https://lookup.test/";

    #[test]
    fn base_url_gets_exactly_one_trailing_slash() {
        assert_eq!(normalize_base_url("http://127.0.0.1:9000"), "http://127.0.0.1:9000/");
        assert_eq!(normalize_base_url("https://api.ipquery.io/"), "https://api.ipquery.io/");
        assert_eq!(normalize_base_url("https://a.test/v1//"), "https://a.test/v1/");
    }

    #[test]
    fn query_ip_appends_address_to_base() {
        let transport = StaticTransport::default().with(
            "https://lookup.test/8.8.8.8",
            200,
            r#"{"ip":"8.8.8.8","risk":{"is_proxy":false,"risk_score":3}}"#,
        );
        let client = Client::with_transport("https://lookup.test", &transport);

        let result = client.query_ip("8.8.8.8").unwrap();
        assert_eq!(result.ip, "8.8.8.8");
        assert_eq!(result.risk.unwrap().risk_score, Some(3));
        assert_eq!(transport.requested(), vec!["https://lookup.test/8.8.8.8"]);
    }

    #[test]
    fn non_200_is_unexpected_status_even_with_valid_body() {
        let transport = StaticTransport::default()
            .with("https://lookup.test/1.1.1.1", 500, r#"{"ip":"1.1.1.1"}"#)
            .with(BASE, 204, "");
        let client = Client::with_transport(BASE, &transport);

        let err = client.query_ip("1.1.1.1").unwrap_err();
        assert_eq!(err.status(), Some(500));
        let err = client.query_own_ip().unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let transport =
            StaticTransport::default().with("https://lookup.test/1.1.1.1", 200, "<html>");
        let client = Client::with_transport(BASE, &transport);

        assert!(matches!(client.query_ip("1.1.1.1"), Err(Error::Decode(_))));
    }

    #[test]
    fn own_ip_is_returned_raw() {
        let transport = StaticTransport::default().with(BASE, 200, "203.0.113.7\n");
        let client = Client::with_transport(BASE, &transport);

        assert_eq!(client.query_own_ip().unwrap(), "203.0.113.7\n");
        assert_eq!(
            client.query_own_addr().unwrap(),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
        assert_eq!(transport.requested(), vec![BASE, BASE]);
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let client = Client::with_transport(BASE, StaticTransport::default());

        let err = client.query_ip("10.0.0.1").unwrap_err();
        assert!(err.is_transport());
    }
}

use reqwest::blocking;

use crate::{ClientConfig, Error};

use super::{RawResponse, Transport};

/// Alternate backend on top of `reqwest::blocking`.
///
/// A blocking reqwest client owns a private runtime, so it must not be
/// created or dropped from inside an async context.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    inner: blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        // reqwest::blocking defaults to a 30s timeout; only keep one if asked.
        let mut builder = blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout());
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let inner = builder.build()?;

        Ok(Self { inner })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        debug!("reqwest GET {}", url);
        let response = self.inner.get(url).send().map_err(|err| {
            let err: Error = err.into();
            debug!("reqwest request failed: {}", err);
            err
        })?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        debug!("reqwest {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}

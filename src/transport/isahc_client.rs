use isahc::{
    ReadResponseExt,
    config::{Configurable, RedirectPolicy},
};

use crate::{ClientConfig, Error};

use super::{RawResponse, Transport};

// Same hop limit as reqwest's default policy.
const MAX_REDIRECTS: u32 = 10;

#[derive(Clone, Debug)]
pub struct IsahcTransport {
    inner: isahc::HttpClient,
}

impl IsahcTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = isahc::HttpClient::builder()
            .default_header("user-agent", config.user_agent.as_str())
            .redirect_policy(RedirectPolicy::Limit(MAX_REDIRECTS));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let inner = builder.build()?;

        Ok(Self { inner })
    }
}

impl Transport for IsahcTransport {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        debug!("isahc GET {}", url);
        let mut response = self.inner.get(url).map_err(|err| {
            let err: Error = err.into();
            debug!("isahc request failed: {}", err);
            err
        })?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        debug!("isahc {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}

mod isahc_client;
mod reqwest_client;

use crate::Error;

pub use isahc_client::IsahcTransport;
pub use reqwest_client::ReqwestTransport;

/// Status line and fully read body of a single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Performs one blocking GET and hands back status and body.
///
/// Implementations must be usable from many threads at once.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<RawResponse, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        (**self).get(url)
    }
}

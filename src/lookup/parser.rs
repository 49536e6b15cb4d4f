use std::{marker::PhantomData, net::IpAddr};

use serde::de::DeserializeOwned;

use crate::Error;

pub trait ResponseParser<T>: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<T, Error>;
}

pub struct JsonParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for JsonParser<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> ResponseParser<T> for JsonParser<T> {
    fn parse(&self, body: &[u8]) -> Result<T, Error> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Default, Clone, Copy)]
pub struct PlainTextParser;

impl ResponseParser<String> for PlainTextParser {
    fn parse(&self, body: &[u8]) -> Result<String, Error> {
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

impl ResponseParser<IpAddr> for PlainTextParser {
    fn parse(&self, body: &[u8]) -> Result<IpAddr, Error> {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        trimmed
            .parse()
            .map_err(|_err| Error::addr_parse_error(trimmed))
    }
}

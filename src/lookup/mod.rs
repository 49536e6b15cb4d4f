mod client;
mod parser;

pub use client::Client;
pub use parser::{JsonParser, PlainTextParser, ResponseParser};

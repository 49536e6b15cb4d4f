//! Blocking client for the ipquery.io IP lookup service.
//!
//! ```no_run
//! let client = ipquery::Client::new()?;
//! let info = client.query_ip("1.1.1.1")?;
//! println!("{} {:?}", info.ip, info.location.and_then(|l| l.city));
//! # Ok::<(), ipquery::Error>(())
//! ```

#[macro_use]
extern crate tracing;

pub mod config;
mod error;
pub mod lookup;
mod model;
pub mod transport;

pub use config::{Backend, ClientConfig, Settings};
pub use error::Error;
pub use lookup::Client;
pub use model::{IspInfo, LocationInfo, LookupResult, RiskInfo};

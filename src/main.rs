#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dotenvy::dotenv;

use ipquery::{Backend, Client, Error, LookupResult, Settings, transport::Transport};

mod trace;

/// Look up geolocation, ISP and risk data for an IP address.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to look up; omit to print your own public IP
    address: Option<String>,

    /// Root URL of the lookup service
    #[arg(long)]
    base_url: Option<String>,

    /// Overall request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// HTTP backend
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Print the own IP as a parsed address instead of the raw body
    #[arg(long)]
    addr: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Isahc,
    Reqwest,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Isahc => Backend::Isahc,
            BackendArg::Reqwest => Backend::Reqwest,
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    trace::init(&settings.log);

    if let Some(base_url) = cli.base_url.clone() {
        settings.client.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout_ms {
        settings.client.timeout_ms = Some(timeout);
    }
    if let Some(backend) = cli.backend {
        settings.backend = backend.into();
    }
    debug!("{:?}", settings);

    let result = match settings.backend {
        Backend::Isahc => Client::from_config(&settings.client).and_then(|c| run(&c, &cli)),
        Backend::Reqwest => Client::reqwest(&settings.client).and_then(|c| run(&c, &cli)),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("[{}] {}", err.code(), err);
            ExitCode::FAILURE
        }
    }
}

fn run<T: Transport>(client: &Client<T>, cli: &Cli) -> Result<String, Error> {
    match cli.address.as_deref() {
        Some(address) => {
            info!("looking up {}", address);
            let result = client.query_ip(address)?;
            Ok(render(&result))
        }
        None if cli.addr => Ok(client.query_own_addr()?.to_string()),
        None => client.query_own_ip(),
    }
}

fn render(result: &LookupResult) -> String {
    serde_json::to_string_pretty(result)
        .expect("lookup results only hold strings, numbers and bools")
}

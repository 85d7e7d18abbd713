use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use clap::Parser;

use crate::DEFAULT_PORT;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The JSON file holding the expiration of every tracked key. Shared with the expiration enforcer.
    #[clap(long, env = "EXPIRATIONS_PATH", default_value = "expirations.json")]
    pub expirations_path: PathBuf,
    /// The address to listen on. The API is unauthenticated so this should stay on localhost.
    #[clap(long, env = "EXPIRATION_API_HOST", default_value_t = LOCALHOST)]
    pub host: IpAddr,
    #[clap(long, env = "EXPIRATION_API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

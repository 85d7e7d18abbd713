use std::path::PathBuf;

use clap::Parser;
use common::proxy_api::DEFAULT_PROXY_CONFIG_PATH;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The JSON file holding the expiration of every tracked key, as written by the expiration API
    #[clap(long, env = "EXPIRATIONS_PATH", default_value = "expirations.json")]
    pub expirations_path: PathBuf,
    /// The proxy server's own config file, used to find the management API URL
    #[clap(long, env = "PROXY_CONFIG_PATH", default_value = DEFAULT_PROXY_CONFIG_PATH)]
    pub proxy_config_path: PathBuf,
    /// Log which keys would be blocked without calling the management API
    #[clap(long)]
    pub dry_run: bool,
}

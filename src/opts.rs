use std::fs;

use anyhow::{format_err, Error};
use serde::Deserialize;
use structopt::StructOpt;

use crate::theme::Theme;

pub fn resolve_opts() -> Opts {
    let mut opts = get_cli_opts();

    if let Ok(config_opts) = get_config_opts() {
        // Options
        opts.token = opts.token.or(config_opts.token);
        opts.update_interval = opts.update_interval.or(config_opts.update_interval);
        opts.theme = opts.theme.or(config_opts.theme);

        // Flags
        opts.hide_help = opts.hide_help || config_opts.hide_help;
        opts.no_seed = opts.no_seed || config_opts.no_seed;
    }

    opts
}

fn get_cli_opts() -> Opts {
    Opts::from_args()
}

fn get_config_opts() -> Result<Opts, Error> {
    let config_dir = dirs_next::config_dir()
        .ok_or_else(|| format_err!("Could not get config directory"))?
        .join("folio");

    let config_path = config_dir.join("config.yml");

    let config = fs::read_to_string(&config_path)?;

    let opts = serde_yaml::from_str(&config)?;

    Ok(opts)
}

#[derive(Debug, StructOpt, Clone, Deserialize, Default)]
#[structopt(
    name = "folio",
    about = "Track a stock portfolio with live quotes in your terminal",
    version = env!("CARGO_PKG_VERSION")
)]
#[serde(default)]
pub struct Opts {
    // Options
    //
    #[structopt(short = "t", long, env = "FOLIO_TOKEN")]
    /// Quote API access token, overriding the embedded one
    pub token: Option<String>,
    #[structopt(short = "i", long)]
    /// Interval to refresh quotes from API (seconds) [default: 10]
    pub update_interval: Option<u64>,
    #[structopt(skip)]
    #[serde(default)]
    /// Color overrides, settable from the config file only
    pub theme: Option<Theme>,

    // Flags
    //
    #[structopt(long)]
    /// Hide help icon in top right
    pub hide_help: bool,
    #[structopt(long)]
    /// Start with an empty portfolio instead of 5 random positions
    pub no_seed: bool,
}

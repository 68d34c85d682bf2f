use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use url::Url;

use veezie::types::ContentType;

/// Drive the addon configuration form from a terminal
#[derive(Parser)]
#[command(name = "veezie")]
#[command(about = "Configure the Veezie streaming addon and get its install link", long_about = None)]
pub struct Cli {
    /// Config file (defaults to veezie.toml in the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit sites to the addon server and print the addon URL
    Configure {
        /// Addon server base URL
        #[arg(short, long, value_name = "URL")]
        server: Url,
        /// Site to add, optionally with types: `https://example.com=movie,anime`
        #[arg(long = "site", value_name = "DOMAIN[=TYPES]")]
        sites: Vec<SiteArg>,
        /// Print the addon URL again as if copied
        #[arg(long)]
        copy: bool,
        /// Print the installer link after a successful configuration
        #[arg(long)]
        install: bool,
    },
    /// Print the installer link for an addon URL
    InstallLink {
        /// Addon URL returned by a previous configure
        #[arg(default_value = "")]
        addon_url: String,
    },
    /// List the content types a site can be configured for
    Types,
}

/// One `--site` value. Text after the last `=` is read as types only when every
/// comma-separated part is a known type, so URLs with query strings pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteArg {
    pub domain: String,
    pub types: Option<Vec<ContentType>>,
}

impl FromStr for SiteArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((domain, tail)) = s.rsplit_once('=') {
            let parsed: Result<Vec<ContentType>> = tail.split(',').map(|t| t.trim().parse()).collect();
            if let Ok(types) = parsed {
                return Ok(Self { domain: domain.to_string(), types: Some(types) });
            }
        }
        Ok(Self { domain: s.to_string(), types: None })
    }
}

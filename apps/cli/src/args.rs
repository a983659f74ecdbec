//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Generate cookie URIs, seal and open encrypted cookie values")]
pub struct Cli {
    /// Configuration file providing `cookie.uri` when `--uri` is absent
    #[arg(short, long, global = true, env = "CBOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the cookie URI comes from.
#[derive(Debug, clap::Args)]
pub struct UriArgs {
    /// Cookie URI, e.g. `encrypted://?name=t&secret=...&salt=...`
    #[arg(short, long)]
    pub uri: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the registered cookie schemes
    Schemes,
    /// Print a fresh `encrypted://` URI with a random secret and salt
    NewUri {
        /// Cookie name
        #[arg(short, long, default_value = "t")]
        name: String,
    },
    /// Seal a value as it would be stored in the cookie
    Seal {
        #[command(flatten)]
        uri: UriArgs,
        value: String,
    },
    /// Open a sealed cookie value
    Open {
        #[command(flatten)]
        uri: UriArgs,
        sealed: String,
    },
    /// Print the `Set-Cookie` header storing a value
    SetCookie {
        #[command(flatten)]
        uri: UriArgs,
        value: String,
    },
    /// Print the `Set-Cookie` header deleting the cookie
    DeleteCookie {
        #[command(flatten)]
        uri: UriArgs,
    },
    /// Generate fresh sign-in and sign-out crumbs from the `[crumbs]` section
    Crumbs,
}

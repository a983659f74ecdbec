#![allow(clippy::print_stdout)]

pub mod args;
pub mod handlers;

use crate::args::{Cli, Commands, UriArgs};
use anyhow::Result;
use cbox_logger::{LevelFilter, Logger};
use clap::Parser;
use cookiebox::domain::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = handlers::load(cli.config.as_deref())?;
    let _logger = logger(config.as_ref(), cli.verbose)?;

    let lines = match cli.command {
        Commands::Schemes => handlers::schemes(),
        Commands::NewUri { name } => vec![handlers::new_uri(&name)],
        Commands::Seal { uri, value } => {
            vec![handlers::seal(cookie(&uri, config.as_ref())?.as_ref(), &value)?]
        },
        Commands::Open { uri, sealed } => {
            vec![handlers::open(cookie(&uri, config.as_ref())?.as_ref(), &sealed)?]
        },
        Commands::SetCookie { uri, value } => {
            handlers::set_cookie(cookie(&uri, config.as_ref())?.as_ref(), &value)?
        },
        Commands::DeleteCookie { uri } => {
            handlers::delete_cookie(cookie(&uri, config.as_ref())?.as_ref())?
        },
        Commands::Crumbs => handlers::crumbs(config.as_ref()),
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn cookie(args: &UriArgs, config: Option<&AppConfig>) -> Result<Box<dyn cookiebox::Cookie>> {
    handlers::cookie(args.uri.as_deref(), config)
}

/// Console logging on stderr; the `[logging]` section applies when a configuration was loaded.
fn logger(config: Option<&AppConfig>, verbose: bool) -> Result<Logger> {
    let logger = match config {
        Some(config) => {
            let mut logging = config.logging.clone();
            if verbose {
                "debug".clone_into(&mut logging.level);
            }
            Logger::from_config(&logging)?
        },
        None => Logger::builder()
            .name(env!("CARGO_BIN_NAME"))
            .level(if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN })
            .init()?,
    };
    Ok(logger)
}

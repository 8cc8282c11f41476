//! Pokedex CLI - Explore PokeAPI from the terminal
//!
//! An interactive prompt that pages through location areas, lists the pokemon
//! found in them, and keeps a pokedex of the ones you catch.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pokedex::api::PokeApiClient;
use pokedex::cache::ExpiringCache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::{help_text, Command};
use pokedex::session::{CommandOutput, Session};

const PROMPT: &str = "\nPokedex> ";

/// Reads commands from stdin until `quit` or end of input
async fn run_repl(session: &mut Session) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match Command::from_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.execute(command).await {
            Ok(CommandOutput::Text(text)) => print!("{}", text),
            Ok(CommandOutput::Quit) => break,
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with REPL output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    debug!(?config, "Starting pokedex");

    let cache = ExpiringCache::new(config.cache_interval)?;
    let client = PokeApiClient::with_base_url(cache, config.base_url)?;
    let mut session = Session::new(client);

    print!("{}", help_text());
    run_repl(&mut session).await?;

    session.client().cache().shutdown().await;
    Ok(())
}

// Entrypoint for the CLI application.
// - Reads configuration once, builds the provider and hands it to the UI loop.
// - Logs go to stderr so they don't mix with the menu; set `RUST_LOG` to see more.

use anyhow::Context;
use monkey_cli::{config::Config, ui::{main_menu, Session}, MonkeyProvider};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // `MONKEY_MCP_URL` enables the remote source; see `config::Config::from_env`.
    let config = Config::from_env().context("Invalid configuration")?;
    let provider = MonkeyProvider::new(&config)?;

    // Blocks until the user exits.
    main_menu(Session::new(provider)?)?;
    Ok(())
}

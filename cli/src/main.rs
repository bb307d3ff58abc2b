use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use todo_sync::{ApiClient, ViewController};
use todo_sync_cli::{Config, Terminal, UreqTransport};

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the UI on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    tracing::info!(base_url = %config.base_url, "starting");

    let client = ApiClient::new(&config.base_url);
    let transport = UreqTransport::new(config.timeout());
    let mut vc = ViewController::new(client, transport);

    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    terminal.run(&mut vc).context("terminal I/O failed")?;
    Ok(())
}

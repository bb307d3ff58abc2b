use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://backengine-zq2g.fly.dev";

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-sync", version, about = "Terminal client for a personal todo list")]
pub struct Config {
    /// Base URL of the todo API
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds (at least 1)
    #[arg(
        long,
        env = "TODO_HTTP_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

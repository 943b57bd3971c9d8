mod symbols;
mod tickers;

use serde_json::Value;
use tickerlist_core::{ApiConfig, ReqwestHttpClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self { data }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = ApiConfig::from_env()?;
    let client = ReqwestHttpClient::new();

    match &cli.command {
        Command::Symbols(args) => symbols::run(args, &client, &config).await,
        Command::Tickers(args) => tickers::run(args, &client, &config).await,
    }
}

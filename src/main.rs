//! omni-transfer
//!
//! Bridges a fixed amount of an ERC-20 token from Base to a NEAR account.
//! Configuration comes from the environment (optionally a `.env` file).
//! The report is printed to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use omni_transfer::blockchain::Wallet;
use omni_transfer::config::{load_from_env, ConfigError};
use omni_transfer::observability::logging::{init_logging, DEFAULT_DIRECTIVE};
use omni_transfer::{
    ConsoleReporter, EvmTransferSubmitter, OmniBridgeApi, RunMode, TransferError,
    TransferWorkflow,
};

#[derive(Parser)]
#[command(name = "omni-transfer")]
#[command(about = "Send tokens from Base to NEAR through the OmniBridge", long_about = None)]
struct Cli {
    /// Dotenv file read before the process environment. Missing file is fine.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Print the fee quote and exit without sending anything.
    #[arg(long)]
    quote_only: bool,
}

async fn run(cli: Cli) -> Result<(), TransferError> {
    let config = load_from_env(&cli.env_file)?;

    tracing::info!(
        network = %config.network,
        api_url = %config.bridge.api_url,
        bridge = %config.bridge.contract_address,
        amount = %config.amount,
        "Configuration loaded"
    );

    let wallet = Wallet::from_private_key(&config.private_key)
        .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;

    let oracle = OmniBridgeApi::new(&config.bridge.api_url, config.rpc_timeout())?;
    let submitter = EvmTransferSubmitter::new(&config, wallet)?;
    let workflow = TransferWorkflow::new(oracle, submitter, config.retries.clone());

    let mode = if cli.quote_only {
        RunMode::QuoteOnly
    } else {
        RunMode::Submit
    };

    let mut reporter = ConsoleReporter::stdout();
    workflow.execute(&config, &mut reporter, mode).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(DEFAULT_DIRECTIVE);

    tracing::info!("omni-transfer v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(stage = %e.stage(), "Transfer failed");
            eprintln!("Error: {}", e.chain());
            ExitCode::from(e.exit_code())
        }
    }
}

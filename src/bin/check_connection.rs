//! Standalone connectivity check against the configured AS/400.
//!
//! Loads the connection settings from the environment, runs the probe query
//! and prints the classified outcome. Exits nonzero on any failure, so it
//! can gate deployments from a shell script.

use as400_production_api::config::ConnectionConfigBuilder;
use as400_production_api::database::{OdbcDatabase, ProductionDatabase};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ConnectionConfigBuilder::new().from_env().and_then(|b| b.build()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Probing {} (library {})...", config.host, config.library);

    match OdbcDatabase::new(config).probe().await {
        Ok(()) => {
            println!("[OK] AS/400 connection established");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}

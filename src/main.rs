//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_verify` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Allow-list loading (file, environment, flags)
//! - Printing the validation outcome as JSON
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use domain_verify::config::{Command, ALLOW_LIST_ENV};
use domain_verify::initialization::{init_logger_with, init_resolver};
use domain_verify::{
    load_allow_list, merge_global_config, Config, DkimKeys, DomainValidator,
    HickoryRecordResolver,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // File first (replace), then individual flags on top (append)
    let allow_list_path = config
        .allow_list
        .clone()
        .or_else(|| std::env::var_os(ALLOW_LIST_ENV).map(PathBuf::from));
    if let Some(path) = allow_list_path {
        let partial = load_allow_list(&path).context("Failed to load allow-list")?;
        merge_global_config(partial, false);
    }
    if let Some(partial) = config.cli_allow_list() {
        merge_global_config(partial, true);
    }

    let resolver = init_resolver(
        Duration::from_secs(config.timeout_secs),
        config.system_resolver,
    )
    .context("Failed to initialize DNS resolver")?;
    let validator = DomainValidator::new(Arc::new(HickoryRecordResolver::new(resolver)), None);

    let valid = match &config.command {
        Command::Web { hostname } => match validator.validate_web(hostname).await {
            Ok(found) => {
                print_json(&found)?;
                true
            }
            Err(e) => {
                print_json(&serde_json::json!({ "error": &e, "chain": e.chain() }))?;
                false
            }
        },
        Command::Mail {
            hostname,
            dkim_selector,
            dkim_key,
        } => {
            let keys = DkimKeys {
                selector: dkim_selector.clone(),
                public_key: dkim_key.clone(),
            };
            let report = validator.validate_mail(hostname, Some(&keys)).await;
            print_json(&report)?;
            report.is_valid()
        }
    };

    if !valid {
        process::exit(1);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

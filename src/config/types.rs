//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::allow_list::PartialAllowList;
use crate::config::constants::DNS_TIMEOUT_SECS;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `domain_verify` binary.
///
/// # Examples
///
/// ```bash
/// # Check that www.example.com aliases to an allowed target
/// domain_verify --cname edge.example.net web www.example.com
///
/// # Check the mail setup, allow-list loaded from a file
/// domain_verify --allow-list allow.json mail example.com \
///     --dkim-selector sel1._domainkey.example.com --dkim-key "v=DKIM1; k=rsa; p=MIIB..."
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "domain_verify",
    about = "Validates DNS records of a domain against an allow-list."
)]
pub struct Config {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// JSON allow-list file (replaces the built-in empty allow-list)
    #[arg(long, value_parser, global = true)]
    pub allow_list: Option<PathBuf>,

    /// Allowed IPv4 address (repeatable)
    #[arg(long = "ipv4", global = true)]
    pub ipv4: Vec<String>,

    /// Allowed IPv6 address (repeatable)
    #[arg(long = "ipv6", global = true)]
    pub ipv6: Vec<String>,

    /// Allowed CNAME target (repeatable)
    #[arg(long = "cname", global = true)]
    pub cnames: Vec<String>,

    /// Allowed MX exchange (repeatable, the first one is suggested as the fix)
    #[arg(long = "mx", global = true)]
    pub mx: Vec<String>,

    /// Value that must appear as `include:<value>` in the SPF record
    #[arg(long, global = true)]
    pub spf: Option<String>,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Use the nameservers from the system resolver configuration
    #[arg(long, global = true)]
    pub system_resolver: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Validation to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Follow the CNAME chain of a hostname, falling back to AAAA/A
    Web {
        /// Hostname to validate
        hostname: String,
    },
    /// Validate SPF, MX and DKIM of a mail domain
    Mail {
        /// Mail domain to validate
        hostname: String,

        /// DKIM selector label (`sel1`) or full record name (`sel1._domainkey.example.com`)
        #[arg(long)]
        dkim_selector: Option<String>,

        /// Expected DKIM TXT record value
        #[arg(long)]
        dkim_key: Option<String>,
    },
}

impl Config {
    /// Allow-list values passed directly on the command line.
    ///
    /// Returns `None` when no allow-list flag was given so the caller can skip the
    /// merge entirely.
    pub fn cli_allow_list(&self) -> Option<PartialAllowList> {
        let partial = PartialAllowList {
            valid_ipv4: non_empty(&self.ipv4),
            valid_ipv6: non_empty(&self.ipv6),
            valid_cnames: non_empty(&self.cnames),
            valid_mx: non_empty(&self.mx),
            valid_spf: self.spf.clone(),
        };
        if partial.is_empty() {
            None
        } else {
            Some(partial)
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

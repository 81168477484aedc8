//! HRDesk MCP Server Binary
//!
//! This is the entry point for running the HRDesk MCP server over stdio.
//!
//! ## Usage
//!
//! ```bash
//! # Run with defaults (seeded stores, 20 default leave days)
//! hrdesk-mcp
//!
//! # Run with an explicit config file
//! hrdesk-mcp --config config/hrdesk.toml
//!
//! # Start empty, strict leave ledger, verbose logs on stderr
//! HRDESK_LEAVE_DEFAULT_ALLOTMENT=0 hrdesk-mcp --no-seed --log-level debug
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hrdesk_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use hrdesk_core::HrServices;
use hrdesk_mcp::HrDeskMcpServer;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hrdesk-mcp", version, about = "HR assistant tools over the Model Context Protocol")]
struct Cli {
    /// Path to a TOML config file (defaults to hrdesk.toml or config/hrdesk.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail if the config file does not exist
    #[arg(long)]
    require_config: bool,

    /// Log level override (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Start with empty stores
    #[arg(long)]
    no_seed: bool,
}

impl Cli {
    fn load_options(self) -> LoadOptions {
        LoadOptions {
            config_path: self.config,
            require_file: self.require_config,
            overrides: ConfigOverrides {
                log_level: self.log_level,
                seed_enabled: self.no_seed.then_some(false),
                ..ConfigOverrides::default()
            },
        }
    }
}

// stdout carries the MCP transport, so logs go to stderr.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(Cli::parse().load_options())?;
    init_logging(&config);

    info!(
        event_name = "system.mcp.starting",
        server_name = %config.server.name,
        default_allotment = config.leave.default_allotment,
        seed_enabled = config.seed.enabled,
        "starting HRDesk MCP server"
    );

    let services = HrServices::from_config(&config);
    if config.seed.enabled {
        let report = services.seed()?;
        info!(
            event_name = "system.mcp.seeded",
            employees = report.employees.len(),
            seeded = report.seeded,
            "stores initialized"
        );
    }

    HrDeskMcpServer::new(services)
        .with_identity(config.server.name.clone(), config.server.instructions.clone())
        .run_stdio()
        .await
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn no_seed_flag_becomes_override() {
        let cli = Cli::parse_from(["hrdesk-mcp", "--no-seed", "--log-level", "debug"]);
        let options = cli.load_options();
        assert_eq!(options.overrides.seed_enabled, Some(false));
        assert_eq!(options.overrides.log_level.as_deref(), Some("debug"));
        assert!(!options.require_file);
    }

    #[test]
    fn seeding_is_left_to_config_without_flag() {
        let options = Cli::parse_from(["hrdesk-mcp"]).load_options();
        assert_eq!(options.overrides.seed_enabled, None);
        assert!(options.config_path.is_none());
    }
}

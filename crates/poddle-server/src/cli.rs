//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// poddle - Epos Now integration server
#[derive(Debug, Parser)]
#[command(name = "poddle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "PODDLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Print the Epos Now consent URL
    AuthUrl {
        /// Space-separated scopes (default: "sales products customers")
        #[arg(long)]
        scopes: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the configuration file path
    Path,
    /// Validate the configuration
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["poddle"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn serve_overrides() {
        let cli =
            Cli::try_parse_from(["poddle", "serve", "--bind", "0.0.0.0", "-p", "8080", "-v"])
                .unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Command::Serve { bind, port }) => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn auth_url_scopes() {
        let cli = Cli::try_parse_from(["poddle", "auth-url", "--scopes", "sales"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::AuthUrl { scopes: Some(ref s) }) if s == "sales"
        ));
    }

    #[test]
    fn config_subcommands() {
        let cli = Cli::try_parse_from(["poddle", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Validate
            })
        ));
    }
}

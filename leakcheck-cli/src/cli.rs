//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Leakcheck -- memory log leak auditor.
///
/// Use `leakcheck <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "leakcheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to the leakcheck.toml configuration file.
    #[arg(short, long, default_value = "leakcheck.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a memory event log for leak signals.
    Audit(AuditArgs),

    /// Inspect the built-in detection rules.
    Rules(RulesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- audit ----

/// Audit a JSONL memory event log.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Path to the JSONL event log to audit.
    pub log: PathBuf,

    /// Write the full structured JSON report to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

// ---- rules ----

/// Inspect detection rules.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List the built-in detection rules.
    List,
}

// ---- config ----

/// Manage leakcheck configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, audit).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_audit_basic() {
        let args = Cli::try_parse_from(["leakcheck", "audit", "memory.jsonl"]);
        assert!(args.is_ok(), "should parse 'audit' subcommand");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Audit(audit_args) => {
                assert_eq!(audit_args.log, PathBuf::from("memory.jsonl"));
                assert!(audit_args.report.is_none(), "report should default to None");
            }
            _ => panic!("expected Audit command"),
        }
    }

    #[test]
    fn test_cli_parse_audit_with_report() {
        let args = Cli::try_parse_from([
            "leakcheck",
            "audit",
            "memory.jsonl",
            "--report",
            "/tmp/report.json",
        ]);
        assert!(args.is_ok(), "should parse audit with report path");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Audit(audit_args) => {
                assert_eq!(audit_args.report, Some(PathBuf::from("/tmp/report.json")));
            }
            _ => panic!("expected Audit command"),
        }
    }

    #[test]
    fn test_cli_parse_audit_missing_log_fails() {
        let args = Cli::try_parse_from(["leakcheck", "audit"]);
        assert!(args.is_err(), "should fail without a log path");
    }

    #[test]
    fn test_cli_parse_rules_list() {
        let args = Cli::try_parse_from(["leakcheck", "rules", "list"]);
        assert!(args.is_ok(), "should parse 'rules list' subcommand");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Rules(rules_args) => match rules_args.action {
                RulesAction::List => {}
            },
            _ => panic!("expected Rules command"),
        }
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let args = Cli::try_parse_from(["leakcheck", "config", "validate"]);
        assert!(args.is_ok(), "should parse 'config validate' subcommand");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Config(config_args) => match config_args.action {
                ConfigAction::Validate => {}
                _ => panic!("expected Validate action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show() {
        let args = Cli::try_parse_from(["leakcheck", "config", "show"]);
        assert!(args.is_ok(), "should parse 'config show' subcommand");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Config(config_args) => match config_args.action {
                ConfigAction::Show { section } => {
                    assert!(section.is_none(), "section should be None");
                }
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let args = Cli::try_parse_from(["leakcheck", "config", "show", "--section", "audit"]);
        assert!(args.is_ok(), "should parse config show with section");
        let cli = args.expect("parse succeeded");
        match cli.command {
            Commands::Config(config_args) => match config_args.action {
                ConfigAction::Show { section } => {
                    assert_eq!(section, Some("audit".to_owned()));
                }
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_custom_config_path() {
        let args = Cli::try_parse_from([
            "leakcheck",
            "-c",
            "/custom/config.toml",
            "audit",
            "memory.jsonl",
        ]);
        assert!(args.is_ok(), "should parse with custom config path");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.config, PathBuf::from("/custom/config.toml"));
    }

    #[test]
    fn test_cli_parse_log_level() {
        let args = Cli::try_parse_from(["leakcheck", "--log-level", "debug", "rules", "list"]);
        assert!(args.is_ok(), "should parse with custom log level");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.log_level, Some("debug".to_owned()));
    }

    #[test]
    fn test_cli_parse_output_format_json() {
        let args = Cli::try_parse_from(["leakcheck", "--output", "json", "audit", "m.jsonl"]);
        assert!(args.is_ok(), "should parse with json output format");
        let cli = args.expect("parse succeeded");
        match cli.output {
            OutputFormat::Json => {}
            _ => panic!("expected Json output format"),
        }
    }

    #[test]
    fn test_cli_parse_output_format_text() {
        let args = Cli::try_parse_from(["leakcheck", "--output", "text", "rules", "list"]);
        assert!(args.is_ok(), "should parse with text output format");
        let cli = args.expect("parse succeeded");
        match cli.output {
            OutputFormat::Text => {}
            _ => panic!("expected Text output format"),
        }
    }

    #[test]
    fn test_cli_parse_invalid_command_fails() {
        let args = Cli::try_parse_from(["leakcheck", "invalid-command"]);
        assert!(args.is_err(), "should fail on invalid command");
    }

    #[test]
    fn test_cli_parse_missing_command_fails() {
        let args = Cli::try_parse_from(["leakcheck"]);
        assert!(args.is_err(), "should fail when no command provided");
    }

    #[test]
    fn test_cli_verify_command_structure() {
        // Verify CLI command compiles and has expected structure
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "leakcheck");

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(
            subcommands.contains(&"audit"),
            "should have 'audit' subcommand"
        );
        assert!(
            subcommands.contains(&"rules"),
            "should have 'rules' subcommand"
        );
        assert!(
            subcommands.contains(&"config"),
            "should have 'config' subcommand"
        );
    }
}

//! `leakcheck rules` command handler

use std::io::Write;

use serde::Serialize;

use leakcheck_audit::classify::{SESSION_PREFIX, SUSPICIOUS_PREFIXES};
use leakcheck_core::types::FindingKind;

use crate::cli::{RulesAction, RulesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `rules` command.
pub async fn execute(args: RulesArgs, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        RulesAction::List => execute_list(writer),
    }
}

fn execute_list(writer: &OutputWriter) -> Result<(), CliError> {
    let report = RuleListReport {
        total: FindingKind::ALL.len(),
        rules: FindingKind::ALL
            .iter()
            .map(|kind| RuleEntry {
                name: kind.rule_name().to_owned(),
                title: kind.title().to_owned(),
                severity: kind.severity().to_string(),
                description: describe(*kind).to_owned(),
            })
            .collect(),
        session_prefix: SESSION_PREFIX.to_owned(),
        suspicious_prefixes: SUSPICIOUS_PREFIXES.iter().map(|p| (*p).to_owned()).collect(),
    };

    writer.render(&report)?;
    Ok(())
}

fn describe(kind: FindingKind) -> &'static str {
    match kind {
        FindingKind::CrossUserKeyReuse => {
            "a key written by one identity was read by a different identity"
        }
        FindingKind::CrossTraceSessionKeyReuse => {
            "a session-scoped key was observed in more than one trace"
        }
        FindingKind::SuspiciousKeyReadCrossUser => {
            "a credential-like key was read by an identity that never wrote it"
        }
    }
}

#[derive(Serialize)]
pub struct RuleListReport {
    pub total: usize,
    pub rules: Vec<RuleEntry>,
    pub session_prefix: String,
    pub suspicious_prefixes: Vec<String>,
}

#[derive(Serialize)]
pub struct RuleEntry {
    pub name: String,
    pub title: String,
    pub severity: String,
    pub description: String,
}

impl Render for RuleListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Detection Rules ({} total)", self.total.to_string().bold())?;
        writeln!(w)?;
        writeln!(
            w,
            "{:<32} {:<36} {:<10} Description",
            "Name", "Title", "Severity"
        )?;
        writeln!(w, "{}", "-".repeat(110))?;

        for r in &self.rules {
            let severity_colored = match r.severity.as_str() {
                "Critical" => r.severity.red().bold(),
                "High" => r.severity.red(),
                "Medium" => r.severity.yellow(),
                _ => r.severity.normal(),
            };
            writeln!(
                w,
                "{:<32} {:<36} {:<10} {}",
                r.name, r.title, severity_colored, r.description
            )?;
        }

        writeln!(w)?;
        writeln!(w, "Session key prefix:    {}", self.session_prefix)?;
        writeln!(
            w,
            "Suspicious prefixes:   {}",
            self.suspicious_prefixes.join(", ")
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[tokio::test]
    async fn test_rules_list_renders_all_rules() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let args = RulesArgs {
            action: RulesAction::List,
        };
        assert!(execute(args, &writer).await.is_ok());
    }

    #[test]
    fn test_rule_list_report_text_output() {
        let report = RuleListReport {
            total: 3,
            rules: FindingKind::ALL
                .iter()
                .map(|kind| RuleEntry {
                    name: kind.rule_name().to_owned(),
                    title: kind.title().to_owned(),
                    severity: kind.severity().to_string(),
                    description: describe(*kind).to_owned(),
                })
                .collect(),
            session_prefix: SESSION_PREFIX.to_owned(),
            suspicious_prefixes: SUSPICIOUS_PREFIXES.iter().map(|p| (*p).to_owned()).collect(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("cross_user_key_reuse"));
        assert!(output.contains("cross_trace_session_key_reuse"));
        assert!(output.contains("suspicious_key_read_cross_user"));
        assert!(output.contains("session."));
        assert!(output.contains("api_key"));
    }

    #[test]
    fn test_rule_list_report_json_shape() {
        let report = RuleListReport {
            total: 3,
            rules: vec![RuleEntry {
                name: "cross_user_key_reuse".to_owned(),
                title: "Cross-user key reuse".to_owned(),
                severity: "High".to_owned(),
                description: "test".to_owned(),
            }],
            session_prefix: "session.".to_owned(),
            suspicious_prefixes: vec!["auth.".to_owned()],
        };

        let json = serde_json::to_value(&report).expect("serialization should succeed");
        assert_eq!(json["total"], 3);
        assert_eq!(json["rules"][0]["name"], "cross_user_key_reuse");
        assert_eq!(json["session_prefix"], "session.");
    }
}

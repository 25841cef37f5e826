//! `leakcheck audit` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use leakcheck_audit::{AuditConfig, AuditPipeline, AuditReport};
use leakcheck_core::config::LeakcheckConfig;
use leakcheck_core::types::FindingKind;

use crate::cli::AuditArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Maximum findings shown per rule in text output.
///
/// The structured JSON report is never truncated; this cap applies to
/// the terminal rendering only.
const DISPLAY_CAP: usize = 20;

/// Execute the `audit` command.
///
/// Exit code is 0 whenever the log was processed, regardless of whether
/// findings exist. Writing the `--report` file happens after rendering,
/// so a bad report path still leaves the summary on screen.
pub async fn execute(
    args: AuditArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = LeakcheckConfig::load_or_default(config_path).await?;

    info!(log = %args.log.display(), "starting memory log audit");

    let pipeline = AuditPipeline::new(AuditConfig::from_core(&config.audit))?;
    let report = pipeline.run(&args.log).await?;

    let payload = AuditCommandReport {
        log: args.log.display().to_string(),
        report,
    };
    writer.render(&payload)?;

    if let Some(report_path) = args.report {
        let json = serde_json::to_vec_pretty(&payload.report)?;
        tokio::fs::write(&report_path, json).await?;
        info!(path = %report_path.display(), "structured report written");
    }

    Ok(())
}

/// Audit output payload.
///
/// JSON rendering serialises the inner report only, so stdout JSON and
/// the `--report` file share the same shape.
#[derive(Serialize)]
pub struct AuditCommandReport {
    #[serde(skip)]
    pub log: String,
    #[serde(flatten)]
    pub report: AuditReport,
}

impl Render for AuditCommandReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let r = &self.report;

        writeln!(w, "Memory Log Audit: {}", self.log.bold())?;
        writeln!(
            w,
            "  Events: {} loaded ({} writes, {} reads, {} other)",
            r.events_loaded, r.writes, r.reads, r.other
        )?;
        writeln!(w)?;

        writeln!(w, "Findings:")?;
        for kind in FindingKind::ALL {
            let count = r.counts.get(kind.rule_name()).copied().unwrap_or(0);
            let count_colored = if count > 0 {
                count.to_string().red().bold()
            } else {
                count.to_string().normal()
            };
            writeln!(
                w,
                "  {:<32} [{:<8}] {}",
                kind.rule_name(),
                kind.severity().to_string(),
                count_colored
            )?;
        }

        if r.is_clean() {
            writeln!(w)?;
            writeln!(w, "{}", "No leak signals detected.".green())?;
            return Ok(());
        }

        for kind in FindingKind::ALL {
            let findings = r.findings_for(kind);
            if findings.is_empty() {
                continue;
            }

            writeln!(w)?;
            writeln!(
                w,
                "{} ({}):",
                kind.title().bold(),
                kind.severity().to_string().yellow()
            )?;
            for finding in findings.iter().take(DISPLAY_CAP) {
                write_evidence(w, finding)?;
            }
            if findings.len() > DISPLAY_CAP {
                writeln!(
                    w,
                    "  ... and {} more (use --report for the full list)",
                    findings.len() - DISPLAY_CAP
                )?;
            }
        }

        Ok(())
    }
}

fn write_evidence(
    w: &mut dyn Write,
    finding: &leakcheck_core::types::Finding,
) -> std::io::Result<()> {
    use leakcheck_core::types::Finding;

    match finding {
        Finding::CrossUserKeyReuse {
            key,
            read_user,
            read_trace,
            writer_users,
            writer_traces,
            read_preview,
        } => {
            writeln!(
                w,
                "  key={} read_user={} read_trace={} writers={} writer_traces={}",
                key,
                read_user,
                read_trace.as_deref().unwrap_or("-"),
                join_or_dash(writer_users),
                join_or_dash(writer_traces),
            )?;
            if let Some(preview) = read_preview {
                writeln!(w, "    preview: {}", preview)?;
            }
        }
        Finding::CrossTraceSessionKeyReuse { key, trace_ids } => {
            writeln!(w, "  key={} traces={}", key, join_or_dash(trace_ids))?;
        }
        Finding::SuspiciousKeyReadCrossUser {
            key,
            read_user,
            writer_users,
            read_trace,
            read_preview,
        } => {
            writeln!(
                w,
                "  key={} read_user={} read_trace={} writers={}",
                key,
                read_user,
                read_trace.as_deref().unwrap_or("-"),
                join_or_dash(writer_users),
            )?;
            if let Some(preview) = read_preview {
                writeln!(w, "    preview: {}", preview)?;
            }
        }
    }
    Ok(())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_owned()
    } else {
        items.join(",")
    }
}

//! Summary Rendering
//!
//! Plain-text summaries of reconciliation and verification runs: per-domain
//! counts, per-record outcomes, and the list of records an operator still has
//! to create by hand.

use crate::application::{DnsReconcileResult, VerificationReport};
use crate::domain::entities::{RecordOutcome, RequiredDnsRecord};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
            warn: "⚠",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
            warn: "[!]",
        }
    }
}

/// Text renderer for DNS results
#[derive(Debug, Clone, Copy)]
pub struct SummaryRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self { unicode: true }
    }
}

impl SummaryRenderer {
    pub fn ascii() -> Self {
        Self { unicode: false }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    /// Render a reconciliation run
    pub fn render_reconcile(&self, result: &DnsReconcileResult) -> String {
        let icons = self.icons();
        let mut lines = Vec::new();

        if result.success() {
            lines.push(format!("{} DNS records reconciled", icons.check));
        } else {
            lines.push(format!("{} DNS reconciliation finished with errors", icons.cross));
        }
        lines.push(format!("  Server IP: {}", result.server_ip));
        lines.push(format!(
            "  {} created, {} existing, {} failed",
            result.created_count(),
            result.existing_count(),
            result.failed_count()
        ));

        if !result.domains.is_empty() {
            lines.push(String::new());
        }
        for summary in &result.domains {
            if summary.provider == "manual" {
                lines.push(format!("  {} (manual): {} manual", summary.domain, summary.manual));
            } else {
                lines.push(format!(
                    "  {} ({}): {} created, {} existing, {} failed",
                    summary.domain, summary.provider, summary.created, summary.existing, summary.failed
                ));
            }
            for record in result.records.iter().filter(|r| r.domain == summary.domain) {
                lines.push(format!("    {}", record_line(record, &icons)));
            }
        }

        if !result.skipped_hostnames.is_empty() {
            lines.push(String::new());
            lines.push("  Skipped (no configured domain):".to_string());
            for skipped in &result.skipped_hostnames {
                lines.push(format!(
                    "    {} {} ({})",
                    icons.skip, skipped.hostname, skipped.app_name
                ));
            }
        }

        let manual: Vec<_> = result.manual_records().collect();
        if !manual.is_empty() {
            lines.push(String::new());
            lines.push(format!("  Manual setup required ({}):", manual.len()));
            for record in manual {
                lines.push(format!(
                    "    {} {} {}",
                    record.hostname, record.record_type, record.value
                ));
            }
        }

        lines.join("\n")
    }

    /// Render a verification pass
    pub fn render_verification(&self, report: &VerificationReport) -> String {
        let icons = self.icons();
        let mut lines = Vec::new();

        if report.all_verified() {
            lines.push(format!(
                "{} DNS verified for {} hostname(s)",
                icons.check,
                report.verified_count()
            ));
        } else {
            lines.push(format!(
                "{} DNS pending for {} of {} hostname(s)",
                icons.warn,
                report.pending_count(),
                report.results.len()
            ));
        }

        for result in &report.results {
            let line = match (&result.error, result.resolved_ip) {
                (Some(error), _) => format!("{} {}: {}", icons.cross, result.hostname, error),
                (None, Some(ip)) if result.skipped => {
                    format!("{} {} -> {} (cached)", icons.check, result.hostname, ip)
                }
                (None, Some(ip)) => format!("{} {} -> {}", icons.check, result.hostname, ip),
                (None, None) => format!("{} {}", icons.skip, result.hostname),
            };
            lines.push(format!("  {}", line));
        }

        lines.join("\n")
    }
}

fn record_line(record: &RequiredDnsRecord, icons: &Icons) -> String {
    let target = format!("{} {} {}", record.subdomain, record.record_type, record.value);
    match &record.outcome {
        RecordOutcome::Created => format!("{} {} (created)", icons.write, target),
        RecordOutcome::Updated { previous } => {
            format!("{} {} (was {})", icons.write, target, previous)
        }
        RecordOutcome::Unchanged => format!("{} {}", icons.check, target),
        RecordOutcome::Manual | RecordOutcome::Pending => format!("{} {}", icons.skip, target),
        RecordOutcome::Failed { error } => format!("{} {}: {}", icons.cross, target, error),
    }
}

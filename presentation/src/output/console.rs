//! Console output formatter for resolution results

use crate::output::formatter::OutputFormatter;
use canonica_application::use_cases::resolve_company::ResolveOutput;
use canonica_domain::CanonicalRecord;
use colored::Colorize;

/// Formats resolution results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete resolution result
    pub fn format(output: &ResolveOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Resolution Results"));
        out.push('\n');

        if output.records.is_empty() {
            out.push_str(&format!("\n{}\n", "No records resolved.".yellow()));
            out.push_str(&Self::footer());
            return out;
        }

        if let Some(tier) = output.resolved_via {
            out.push_str(&format!(
                "{} {}\n",
                "Resolved via:".cyan().bold(),
                tier.as_str()
            ));
        }

        for record in &output.records {
            out.push_str(&Self::record_section(record));
        }

        out.push_str(&Self::footer());
        out
    }

    /// Format as JSON
    pub fn format_json(output: &ResolveOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one line per record (concise output)
    pub fn format_compact(output: &ResolveOutput) -> String {
        if output.records.is_empty() {
            return "No records resolved.".to_string();
        }
        output
            .records
            .iter()
            .map(|r| {
                format!(
                    "{}  {}  {}",
                    r.name.bold(),
                    r.website_url,
                    format!("(confidence {:.2})", r.confidence).dimmed()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn record_section(record: &CanonicalRecord) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n{}\n{}\n",
            format!("── {} ──", record.name).yellow().bold(),
            "-".repeat(40)
        ));

        out.push_str(&Self::field("Website", Some(&record.website_url)));
        out.push_str(&Self::field("Domain", Some(&record.domain)));
        out.push_str(&Self::field("Description", record.description.as_deref()));
        out.push_str(&Self::list_field("Industries", &record.industries));
        out.push_str(&Self::field("Headquarters", record.headquarters.as_deref()));
        out.push_str(&Self::field("Employees", record.employee_count.as_deref()));
        out.push_str(&Self::list_field("Founders", &record.founders));
        out.push_str(&Self::list_field("Leadership", &record.leadership));
        out.push_str(&Self::field("LinkedIn", record.linkedin_url.as_deref()));
        out.push_str(&Self::field("Crunchbase", record.crunchbase_url.as_deref()));
        out.push_str(&Self::field("Total funding", record.total_funding.as_deref()));
        out.push_str(&Self::field(
            "Last round",
            record.last_funding_round.as_deref(),
        ));
        out.push_str(&Self::field("Valuation", record.valuation.as_deref()));
        if let Some(is_public) = record.is_public {
            let status = if is_public {
                match record.ticker.as_deref() {
                    Some(ticker) => format!("public ({ticker})"),
                    None => "public".to_string(),
                }
            } else {
                "private".to_string()
            };
            out.push_str(&Self::field("Listing", Some(&status)));
        }
        out.push_str(&Self::field("Logo", record.logo_url.as_deref()));
        out.push_str(&Self::list_field("Sources", &record.sources));
        out.push_str(&format!(
            "  {} {:.2}\n",
            "Confidence:".cyan(),
            record.confidence
        ));

        out
    }

    fn field(label: &str, value: Option<&str>) -> String {
        match value {
            Some(v) if !v.is_empty() => format!("  {} {}\n", format!("{label}:").cyan(), v),
            _ => String::new(),
        }
    }

    fn list_field(label: &str, values: &[String]) -> String {
        if values.is_empty() {
            return String::new();
        }
        format!("  {} {}\n", format!("{label}:").cyan(), values.join(", "))
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &ResolveOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &ResolveOutput) -> String {
        Self::format_json(output)
    }

    fn format_compact(&self, output: &ResolveOutput) -> String {
        Self::format_compact(output)
    }
}

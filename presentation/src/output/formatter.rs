//! Output formatter trait

use canonica_application::use_cases::resolve_company::ResolveOutput;

/// Trait for formatting resolution results
pub trait OutputFormatter {
    /// Format the complete resolution result
    fn format(&self, output: &ResolveOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &ResolveOutput) -> String;

    /// Format one line per record (concise output)
    fn format_compact(&self, output: &ResolveOutput) -> String;
}

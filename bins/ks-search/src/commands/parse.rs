//! Parse command - show how a query is interpreted

use anyhow::Result;
use keepsake_cli::output::Status;
use keepsake_core::config::Config;
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output for a parsed query
#[derive(Debug, Serialize)]
struct JsonParseOutput<'a> {
    query: &'a str,
    parsed: &'a keepsake_search::ParsedQuery,
    has_criteria: bool,
    filters: Vec<String>,
}

/// Run parse command
pub fn run(raw: &str, config: &Config, format: &str) -> Result<()> {
    let parsed = config.query_parser().parse(raw);

    if format == "json" {
        let output = JsonParseOutput {
            query: raw,
            parsed: &parsed,
            has_criteria: parsed.has_search_criteria(),
            filters: parsed.filter_summary(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !parsed.has_search_criteria() {
        Status::info("No search criteria: every record matches");
        return Ok(());
    }

    Status::header(&format!("Parsed {}", raw));

    print_list("Terms", &parsed.terms);
    print_list("Phrases", &parsed.exact_phrases);
    print_list("Excluded", &parsed.exclude_terms);
    for group in &parsed.or_groups {
        println!("  {:<10} {}", "Any of".dimmed(), group.join(" | "));
    }
    for filter in parsed.filter_summary() {
        println!("  {:<10} {}", "Filter".dimmed(), filter);
    }

    Ok(())
}

fn print_list(label: &str, values: &[String]) {
    if !values.is_empty() {
        println!("  {:<10} {}", label.dimmed(), values.join(", "));
    }
}

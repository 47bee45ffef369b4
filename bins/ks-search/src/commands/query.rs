//! Query command - rank catalog records against a query

use anyhow::Result;
use keepsake_cli::output::{format_count, format_duration, result_line, Status};
use keepsake_core::{catalog::Catalog, config::Config};
use keepsake_search::search_parsed;
use keepsake_telemetry::Timer;
use owo_colors::OwoColorize;
use keepsake_search::ContentType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// JSON output for query results
#[derive(Debug, Serialize)]
struct JsonQueryOutput<'a> {
    query: &'a str,
    filters: Vec<String>,
    counts: BTreeMap<ContentType, usize>,
    total: usize,
    results: Vec<JsonHit<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonHit<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    content_type: ContentType,
    title: &'a str,
    score: u32,
}

/// Run query command
pub fn run(
    catalog_path: &Path,
    raw: &str,
    limit: Option<usize>,
    config: &Config,
    format: &str,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let limit = limit.unwrap_or(config.schema.search.result_limit);

    let timer = Timer::start("query");
    let query = config.query_parser().parse(raw);
    let results = search_parsed(catalog.items(), &query);
    let elapsed = timer.stop();

    tracing::debug!(
        records = catalog.len(),
        matches = results.len(),
        criteria = query.has_search_criteria(),
        "Query evaluated"
    );

    if format == "json" {
        let output = JsonQueryOutput {
            query: raw,
            filters: query.filter_summary(),
            counts: catalog.counts_by_type(),
            total: results.len(),
            results: results
                .iter()
                .take(limit)
                .map(|r| JsonHit {
                    id: &r.item.id,
                    content_type: r.item.content_type,
                    title: &r.item.title,
                    score: r.score,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header(&format!("Results for {}", raw));

    let counts: Vec<String> = catalog
        .counts_by_type()
        .into_iter()
        .map(|(kind, count)| format!("{} {}", count, kind.label()))
        .collect();
    println!("{} {}", "Catalog:".dimmed(), counts.join(" · "));

    let filters = query.filter_summary();
    if !filters.is_empty() {
        println!("{} {}", "Filters:".dimmed(), filters.join(" · "));
    }
    println!();

    if results.is_empty() {
        Status::warning("No records matched");
        return Ok(());
    }

    for (rank, result) in results.iter().take(limit).enumerate() {
        println!(
            "{}",
            result_line(rank + 1, result.score, result.item.content_type.label(), &result.item.title)
        );
    }

    println!();
    Status::info(&format!(
        "{} of {} in {}",
        format_count(results.len(), "match", "matches"),
        format_count(catalog.len(), "record", "records"),
        format_duration(elapsed)
    ));

    Ok(())
}

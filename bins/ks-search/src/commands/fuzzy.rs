//! Fuzzy command - fuzzy search over catalog titles

use anyhow::Result;
use keepsake_cli::output::{format_count, highlight, result_line, Status};
use keepsake_core::{catalog::Catalog, config::Config};
use keepsake_search::{fuzzy_filter_with_threshold, fuzzy_match};
use serde::Serialize;
use std::path::Path;

/// JSON output for fuzzy results
#[derive(Debug, Serialize)]
struct JsonFuzzyOutput<'a> {
    query: &'a str,
    threshold: u32,
    total: usize,
    results: Vec<JsonFuzzyHit<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFuzzyHit<'a> {
    id: &'a str,
    title: &'a str,
    score: u32,
    highlight_ranges: Vec<(usize, usize)>,
}

/// Run fuzzy command
pub fn run(
    catalog_path: &Path,
    query: &str,
    threshold: Option<u32>,
    limit: Option<usize>,
    config: &Config,
    format: &str,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let threshold = threshold.unwrap_or(config.schema.search.fuzzy_threshold);
    let limit = limit.unwrap_or(config.schema.search.result_limit);

    let results =
        fuzzy_filter_with_threshold(catalog.items(), query, |item| item.title.as_str(), threshold);

    if format == "json" {
        let output = JsonFuzzyOutput {
            query,
            threshold,
            total: results.len(),
            results: results
                .iter()
                .take(limit)
                .map(|r| JsonFuzzyHit {
                    id: &r.item.id,
                    title: &r.item.title,
                    score: r.score,
                    highlight_ranges: fuzzy_match(query, &r.item.title).highlight_ranges,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if results.is_empty() {
        Status::warning(&format!("No titles match {}", query));
        return Ok(());
    }

    for (rank, result) in results.iter().take(limit).enumerate() {
        let ranges = fuzzy_match(query, &result.item.title).highlight_ranges;
        println!(
            "{}",
            result_line(
                rank + 1,
                result.score,
                result.item.content_type.label(),
                &highlight(&result.item.title, &ranges)
            )
        );
    }

    println!();
    Status::info(&format_count(results.len(), "title", "titles"));

    Ok(())
}

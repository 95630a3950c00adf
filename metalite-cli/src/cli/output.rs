// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use crate::cli::commands::OutputFormat;
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use metalite::{CatalogRecord, QueryResult};

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format one page of datasets in the specified format
    ///
    /// `now` anchors the relative "updated N days ago" column.
    pub fn format(result: &QueryResult, format: OutputFormat, now: DateTime<Utc>) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result, now),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    /// Format a single dataset's detail view
    pub fn format_record(record: &CatalogRecord, format: OutputFormat, now: DateTime<Utc>) -> String {
        match format {
            OutputFormat::Table => Self::format_record_table(record, now),
            OutputFormat::Json => serde_json::to_string_pretty(record)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
            OutputFormat::Csv => Self::format_schema_csv(record),
        }
    }

    /// Format the tag listing as a two-column table
    pub fn format_tags(tags: &[(String, usize)]) -> String {
        if tags.is_empty() {
            return format!("{}\n", "No tags found".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Tag").fg(Color::Green),
            Cell::new("Datasets").fg(Color::Green),
        ]);
        for (tag, count) in tags {
            table.add_row(vec![tag.clone(), count.to_string()]);
        }

        format!("{}\n", table)
    }

    fn format_table(result: &QueryResult, now: DateTime<Utc>) -> String {
        if result.records.is_empty() {
            let mut output = format!("{}\n", "No datasets found".yellow());
            if result.total_count > 0 {
                output.push_str(&format!(
                    "Page {} is past the last page ({} matching datasets)\n",
                    result.page, result.total_count
                ));
            }
            return output;
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Datasets".bold().green()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["Name", "Owner", "Freshness", "Tags"]
                .iter()
                .map(|col| Cell::new(col).fg(Color::Green))
                .collect::<Vec<Cell>>(),
        );

        for record in &result.records {
            table.add_row(vec![
                record.name.clone(),
                record.owner.name.clone(),
                relative_time(record.last_updated, now),
                record.tags.join(", "),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Page {} of {} ({} matching datasets)\n",
            result.page,
            result.total_pages(),
            result.total_count
        ));
        if result.has_next_page() {
            output.push_str(&format!("{}\n", "More results on the next page".dimmed()));
        }

        output
    }

    /// The connection envelope exactly as the library serializes it
    fn format_json(result: &QueryResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn format_csv(result: &QueryResult) -> String {
        let mut output = String::from("id,name,owner,last_updated,tags\n");
        for record in &result.records {
            let row = [
                csv_field(&record.id),
                csv_field(&record.name),
                csv_field(&record.owner.name),
                record.last_updated.to_rfc3339(),
                csv_field(&record.tags.join(";")),
            ];
            output.push_str(&row.join(","));
            output.push('\n');
        }
        output.push_str(&format!("# total_count={}\n", result.total_count));
        output
    }

    fn format_record_table(record: &CatalogRecord, now: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", record.name.bold().green()));
        output.push_str(&format!(
            "Owner: {} <{}>\n",
            record.owner.name, record.owner.email
        ));
        output.push_str(&format!(
            "Updated: {} ({})\n",
            record.last_updated.format("%Y-%m-%d %H:%M UTC"),
            relative_time(record.last_updated, now)
        ));
        output.push_str(&format!("Tags: {}\n", record.tags.join(", ")));
        if !record.description.is_empty() {
            output.push_str(&format!("\n{}\n", record.description));
        }

        // Schema
        output.push_str(&format!("\n{}\n", "Schema".bold()));
        if record.schema.is_empty() {
            output.push_str(&format!("{}\n", "No columns".yellow()));
        } else {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(
                ["Column", "Type", "Description"]
                    .iter()
                    .map(|col| Cell::new(col).fg(Color::Green))
                    .collect::<Vec<Cell>>(),
            );
            for column in &record.schema {
                table.add_row(vec![
                    column.name.clone(),
                    column.data_type.clone(),
                    column.description.clone().unwrap_or_default(),
                ]);
            }
            output.push_str(&table.to_string());
            output.push('\n');
        }

        // Lineage
        output.push_str(&format!("\n{}\n", "Lineage".bold()));
        let names = |nodes: &[metalite::LineageNode]| {
            if nodes.is_empty() {
                "-".to_string()
            } else {
                nodes
                    .iter()
                    .map(|n| n.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };
        output.push_str(&format!(
            "{} → {} → {}\n",
            names(&record.lineage.upstream),
            record.name.bold(),
            names(&record.lineage.downstream)
        ));

        // Usage
        let summary = record.usage_summary();
        output.push_str(&format!("\n{}\n", "Usage".bold()));
        if summary.days == 0 {
            output.push_str(&format!("{}\n", "No usage recorded".yellow()));
        } else {
            output.push_str(&format!(
                "{} queries over {} days ({:.1}/day)\n",
                summary.total_queries,
                summary.days,
                summary.daily_average()
            ));
            if let Some(peak) = summary.peak {
                output.push_str(&format!("Peak: {} queries on {}\n", peak.queries, peak.date));
            }
        }

        // Freshness trend
        if !record.freshness.is_empty() {
            output.push_str(&format!("\n{}\n", "Freshness".bold()));
            for point in &record.freshness {
                output.push_str(&format!(
                    "  week of {}: {}\n",
                    point.date,
                    point.last_updated.format("%Y-%m-%d %H:%M")
                ));
            }
        }

        output
    }

    fn format_schema_csv(record: &CatalogRecord) -> String {
        let mut output = String::from("column,type,description\n");
        for column in &record.schema {
            let row = [
                csv_field(&column.name),
                csv_field(&column.data_type),
                csv_field(column.description.as_deref().unwrap_or("")),
            ];
            output.push_str(&row.join(","));
            output.push('\n');
        }
        output
    }
}

/// Human-friendly age of `then` relative to `now`
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    match elapsed.num_minutes() {
        0 => "just now".to_string(),
        m if m < 60 => plural(m, "minute"),
        m if m < 24 * 60 => plural(m / 60, "hour"),
        _ => plural(elapsed.num_days(), "day"),
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

//! Export of computed reports to JSON, CSV and Markdown
//!
//! All exporters take a finished [`AnalyticsData`] bundle, create missing
//! parent directories and overwrite the destination file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analytics::AnalyticsData;

fn create_writer(path: &Path, kind: &str) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create {} file: {}", kind, path.display()))?;

    Ok(BufWriter::new(file))
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Export the full bundle as pretty-printed JSON
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use dineboard_core::analytics::{AnalyticsData, Dataset};
/// use dineboard_core::config::ReportConfig;
/// use dineboard_core::export::export_reports_to_json;
/// use std::path::Path;
///
/// let report = AnalyticsData::compute(&Dataset::default(), &ReportConfig::default(), Utc::now());
/// export_reports_to_json(&report, Path::new("reports.json")).unwrap();
/// ```
pub fn export_reports_to_json(report: &AnalyticsData, path: &Path) -> Result<()> {
    let mut writer = create_writer(path, "JSON")?;

    serde_json::to_writer_pretty(&mut writer, report)
        .context("Failed to serialize reports to JSON")?;
    writeln!(writer)?;

    writer.flush().context("Failed to flush JSON writer")?;
    Ok(())
}

/// Export the tabular reports to CSV
///
/// One section per report (revenue, daily, hourly, top foods, categories),
/// each introduced by a `# name` line and its own header row, separated by
/// blank lines.
pub fn export_reports_to_csv(report: &AnalyticsData, path: &Path) -> Result<()> {
    let mut writer = create_writer(path, "CSV")?;

    writeln!(writer, "# revenue")?;
    writeln!(writer, "Range,Revenue,Orders")?;
    for ((label, revenue), (_, orders)) in report
        .revenue
        .rows()
        .iter()
        .zip(report.order_counts.rows().iter())
    {
        writeln!(writer, "{},{:.2},{}", label, revenue, orders)
            .with_context(|| format!("Failed to write revenue row {}", label))?;
    }
    writeln!(writer)?;

    writeln!(writer, "# daily")?;
    writeln!(writer, "Date,Label,Revenue")?;
    for day in &report.daily {
        writeln!(
            writer,
            "{},{},{:.2}",
            day.date.format("%Y-%m-%d"),
            csv_field(&day.label),
            day.revenue
        )
        .with_context(|| format!("Failed to write daily row {}", day.date))?;
    }
    writeln!(writer)?;

    writeln!(writer, "# hourly")?;
    writeln!(writer, "Hour,Revenue")?;
    for hour in &report.hourly {
        writeln!(writer, "{},{:.2}", hour.label(), hour.revenue)?;
    }
    writeln!(writer)?;

    writeln!(writer, "# top_foods")?;
    writeln!(writer, "Food ID,Food,Revenue,Orders,Quantity")?;
    for food in &report.top_foods {
        writeln!(
            writer,
            "{},{},{:.2},{},{}",
            csv_field(&food.food_id),
            csv_field(&food.food_name),
            food.revenue,
            food.order_count,
            food.quantity_sold
        )
        .with_context(|| format!("Failed to write row for food {}", food.food_id))?;
    }
    writeln!(writer)?;

    writeln!(writer, "# categories")?;
    writeln!(writer, "Category ID,Category,Revenue,Orders,Quantity")?;
    for category in &report.categories {
        writeln!(
            writer,
            "{},{},{:.2},{},{}",
            csv_field(&category.category_id),
            csv_field(&category.category_name),
            category.revenue,
            category.order_count,
            category.quantity_sold
        )
        .with_context(|| format!("Failed to write row for category {}", category.category_id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export a human-readable Markdown report, insights included
pub fn export_reports_to_markdown(report: &AnalyticsData, path: &Path) -> Result<()> {
    let mut writer = create_writer(path, "Markdown")?;

    writeln!(writer, "# Restaurant Sales Report")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "**Generated**: {}",
        report.computed_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(writer)?;

    writeln!(writer, "## Revenue")?;
    writeln!(writer)?;
    writeln!(writer, "| Range | Revenue | Orders |")?;
    writeln!(writer, "|-------|---------|--------|")?;
    for ((label, revenue), (_, orders)) in report
        .revenue
        .rows()
        .iter()
        .zip(report.order_counts.rows().iter())
    {
        writeln!(writer, "| {} | {:.2} | {} |", label, revenue, orders)?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "**Average order value**: {:.2}",
        report.average_order_value
    )?;
    writeln!(writer)?;

    let status = &report.status;
    if !status.is_empty() {
        writeln!(writer, "## Order Status")?;
        writeln!(writer)?;
        writeln!(writer, "| Status | Orders |")?;
        writeln!(writer, "|--------|--------|")?;
        writeln!(writer, "| Completed | {} |", status.completed)?;
        writeln!(writer, "| In progress | {} |", status.in_progress)?;
        writeln!(writer, "| Canceled | {} |", status.canceled)?;
        if status.other() > 0 {
            writeln!(writer, "| Other | {} |", status.other())?;
        }
        writeln!(writer)?;
    }

    if !report.top_foods.is_empty() {
        writeln!(writer, "## Top Foods")?;
        writeln!(writer)?;
        writeln!(writer, "| # | Food | Revenue | Orders | Quantity |")?;
        writeln!(writer, "|---|------|---------|--------|----------|")?;
        for (rank, food) in report.top_foods.iter().enumerate() {
            writeln!(
                writer,
                "| {} | {} | {:.2} | {} | {} |",
                rank + 1,
                food.food_name.replace('|', "\\|"),
                food.revenue,
                food.order_count,
                food.quantity_sold
            )?;
        }
        writeln!(writer)?;
    }

    if !report.categories.is_empty() {
        writeln!(writer, "## Categories")?;
        writeln!(writer)?;
        writeln!(writer, "| Category | Revenue | Orders | Quantity |")?;
        writeln!(writer, "|----------|---------|--------|----------|")?;
        for category in &report.categories {
            writeln!(
                writer,
                "| {} | {:.2} | {} | {} |",
                category.category_name.replace('|', "\\|"),
                category.revenue,
                category.order_count,
                category.quantity_sold
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "## Daily Revenue")?;
    writeln!(writer)?;
    writeln!(writer, "| Day | Revenue |")?;
    writeln!(writer, "|-----|---------|")?;
    for day in &report.daily {
        writeln!(writer, "| {} | {:.2} |", day.label, day.revenue)?;
    }
    writeln!(writer)?;

    // Only hours with sales, the full 24 rows are in the JSON/CSV exports
    let busy: Vec<_> = report.hourly.iter().filter(|h| h.revenue > 0.0).collect();
    if !busy.is_empty() {
        writeln!(writer, "## Hourly Revenue")?;
        writeln!(writer)?;
        writeln!(writer, "| Hour | Revenue |")?;
        writeln!(writer, "|------|---------|")?;
        for hour in busy {
            writeln!(writer, "| {} | {:.2} |", hour.label(), hour.revenue)?;
        }
        writeln!(writer)?;
    }

    let insights = report.insights();
    if !insights.is_empty() {
        writeln!(writer, "## Insights")?;
        writeln!(writer)?;
        for insight in &insights {
            writeln!(writer, "- {}", insight)?;
        }
        writeln!(writer)?;
    }

    writer.flush().context("Failed to flush Markdown writer")?;
    Ok(())
}

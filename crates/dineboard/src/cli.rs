//! Report rendering for the command line
//!
//! Every formatter returns either a comfy-table rendering or pretty JSON,
//! depending on the `json` flag.

use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use dineboard_core::analytics::AnalyticsData;
use dineboard_core::error::{ErrorSeverity, LoadReport};
use dineboard_core::models::{
    CategoryPerformance, DailyRevenue, FoodPerformance, HourlyRevenue, OrderStatusDistribution,
};
use serde::Serialize;
use std::path::PathBuf;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    DataDirUnavailable {
        path: PathBuf,
        suggestion: Option<String>,
    },
    Core(dineboard_core::error::CoreError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::DataDirUnavailable { path, suggestion } => {
                write!(f, "Data directory not found: {}", path.display())?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  hint: {}", hint)?;
                }
                Ok(())
            }
            CliError::Core(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<dineboard_core::error::CoreError> for CliError {
    fn from(e: dineboard_core::error::CoreError) -> Self {
        CliError::Core(e)
    }
}

// ============================================================================
// Formatters
// ============================================================================

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn amount_cell(value: f64) -> Cell {
    Cell::new(format_money(value)).set_alignment(CellAlignment::Right)
}

fn count_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// Revenue and order counts per range, followed by AOV and status
pub fn format_summary(report: &AnalyticsData, json: bool, no_color: bool) -> String {
    if json {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Summary<'a> {
            revenue: &'a dineboard_core::models::RevenueByTimeRange,
            order_counts: &'a dineboard_core::models::OrderCountsByTimeRange,
            average_order_value: f64,
            status: &'a OrderStatusDistribution,
        }
        return to_json(&Summary {
            revenue: &report.revenue,
            order_counts: &report.order_counts,
            average_order_value: report.average_order_value,
            status: &report.status,
        });
    }

    let mut lines = vec![format_revenue(report, false, no_color)];
    lines.push(String::new());
    lines.push(format!(
        "Average order value: {}",
        format_money(report.average_order_value)
    ));
    if !report.status.is_empty() {
        lines.push(String::new());
        lines.push(format_status(&report.status, false, no_color));
    }
    lines.join("\n")
}

/// Revenue and order counts for every time range
pub fn format_revenue(report: &AnalyticsData, json: bool, no_color: bool) -> String {
    if json {
        return to_json(&report.revenue);
    }

    let mut table = new_table(&["Range", "Revenue", "Orders"], no_color);
    for ((label, revenue), (_, orders)) in report
        .revenue
        .rows()
        .iter()
        .zip(report.order_counts.rows().iter())
    {
        table.add_row(Row::from(vec![
            Cell::new(label),
            amount_cell(*revenue),
            count_cell(orders),
        ]));
    }
    table.to_string()
}

pub fn format_top_foods(foods: &[FoodPerformance], json: bool, no_color: bool) -> String {
    if json {
        return to_json(foods);
    }
    if foods.is_empty() {
        return "No food sales found.".to_string();
    }

    let mut table = new_table(&["#", "Food", "Revenue", "Orders", "Qty"], no_color);
    for (rank, food) in foods.iter().enumerate() {
        table.add_row(Row::from(vec![
            count_cell(rank + 1),
            Cell::new(truncate(&food.food_name, 32)),
            amount_cell(food.revenue),
            count_cell(food.order_count),
            count_cell(food.quantity_sold),
        ]));
    }
    table.to_string()
}

pub fn format_categories(categories: &[CategoryPerformance], json: bool, no_color: bool) -> String {
    if json {
        return to_json(categories);
    }
    if categories.is_empty() {
        return "No category sales found.".to_string();
    }

    let mut table = new_table(&["Category", "Revenue", "Orders", "Qty"], no_color);
    for category in categories {
        table.add_row(Row::from(vec![
            Cell::new(truncate(&category.category_name, 32)),
            amount_cell(category.revenue),
            count_cell(category.order_count),
            count_cell(category.quantity_sold),
        ]));
    }
    table.to_string()
}

pub fn format_daily(days: &[DailyRevenue], json: bool, no_color: bool) -> String {
    if json {
        return to_json(days);
    }

    let max = days.iter().map(|d| d.revenue).fold(0.0, f64::max);
    let mut table = new_table(&["Day", "Date", "Revenue", ""], no_color);
    for day in days {
        table.add_row(Row::from(vec![
            Cell::new(&day.label),
            Cell::new(day.date.format("%Y-%m-%d")),
            amount_cell(day.revenue),
            Cell::new(bar(day.revenue, max, 20)),
        ]));
    }
    table.to_string()
}

/// Hours with zero revenue are kept so the day shape stays visible
pub fn format_hourly(hours: &[HourlyRevenue], json: bool, no_color: bool) -> String {
    if json {
        return to_json(hours);
    }

    let max = hours.iter().map(|h| h.revenue).fold(0.0, f64::max);
    let mut table = new_table(&["Hour", "Revenue", ""], no_color);
    for hour in hours {
        table.add_row(Row::from(vec![
            Cell::new(hour.label()),
            amount_cell(hour.revenue),
            Cell::new(bar(hour.revenue, max, 20)),
        ]));
    }
    table.to_string()
}

pub fn format_status(status: &OrderStatusDistribution, json: bool, no_color: bool) -> String {
    if json {
        return to_json(status);
    }
    if status.is_empty() {
        return "No orders found.".to_string();
    }

    let mut table = new_table(&["Status", "Orders", "Share"], no_color);
    let mut rows = vec![
        ("Completed", status.completed),
        ("In progress", status.in_progress),
        ("Canceled", status.canceled),
    ];
    if status.other() > 0 {
        rows.push(("Other", status.other()));
    }
    for (label, count) in rows {
        let share = count as f64 / status.total as f64 * 100.0;
        table.add_row(Row::from(vec![
            Cell::new(label),
            count_cell(count),
            Cell::new(format!("{:.1}%", share)).set_alignment(CellAlignment::Right),
        ]));
    }
    table.to_string()
}

pub fn format_insights(insights: &[String], json: bool) -> String {
    if json {
        return to_json(insights);
    }
    if insights.is_empty() {
        return "Not enough data for insights yet.".to_string();
    }
    insights
        .iter()
        .map(|i| format!("• {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per load problem, for stderr
pub fn format_load_warnings(report: &LoadReport) -> Vec<String> {
    report
        .errors
        .iter()
        .map(|error| {
            let level = match error.severity {
                ErrorSeverity::Warning => "warning",
                ErrorSeverity::Error => "error",
            };
            match &error.suggestion {
                Some(hint) => format!(
                    "{}: {}: {} (hint: {})",
                    level, error.source, error.message, hint
                ),
                None => format!("{}: {}: {}", level, error.source, error.message),
            }
        })
        .collect()
}

// ============================================================================
// Utilities
// ============================================================================

fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round().max(1.0) as usize;
    "█".repeat(filled.min(width))
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================

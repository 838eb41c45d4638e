//! dineboard - Restaurant sales reports from the command line

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dineboard_core::config::CONFIG_FILE_NAME;
use dineboard_core::error::LoadError;
use dineboard_core::{
    export_reports_to_csv, export_reports_to_json, export_reports_to_markdown, AnalyticsData,
    CoreError, DataStore, JsonDirSource, ReportConfig,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "dineboard",
    version,
    about = "Restaurant sales analytics",
    long_about = "Computes sales reports from exported restaurant order data.\n\
                  \n\
                  Reads orders.json, order_items.json, foods.json and categories.json\n\
                  from the data directory. Missing files are treated as empty.\n\
                  \n\
                  Examples:\n\
                    dineboard                        # Revenue, order counts, AOV, status\n\
                    dineboard top-foods --limit 5    # Five best sellers\n\
                    dineboard daily --days 30        # Revenue for the last 30 days\n\
                    dineboard --format json hourly   # Hourly revenue as JSON\n\
                    dineboard export -o report.md    # Full Markdown report\n\
                  \n\
                  Environment Variables:\n\
                    DINEBOARD_DATA_DIR               # Data directory\n\
                    DINEBOARD_CONFIG                 # Path to dineboard.toml\n\
                    DINEBOARD_FORMAT                 # Force output format: json|table\n\
                    DINEBOARD_NO_COLOR               # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the exported collections (default: <data dir>/dineboard)
    #[arg(long, env = "DINEBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the report config (default: <data-dir>/dineboard.toml)
    #[arg(long, env = "DINEBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, env = "DINEBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "DINEBOARD_NO_COLOR")]
    no_color: bool,

    /// Log more (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Revenue, order counts, average order value and status (default)
    Summary,
    /// Revenue and order counts per time range
    Revenue,
    /// Best-selling foods by revenue
    TopFoods {
        /// Max entries
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Revenue per food category
    Categories {
        /// Max entries
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Revenue per day, oldest first
    Daily {
        /// Number of days ending today
        #[arg(long, short = 'd')]
        days: Option<usize>,
    },
    /// Revenue per hour of day
    Hourly,
    /// Orders per status
    Status,
    /// Rule-based observations on the latest numbers
    Insights,
    /// Write every report to a file
    Export {
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// File format (default: from the extension, else json)
        #[arg(long = "format", short = 'f', value_enum)]
        export_format: Option<ExportFormat>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => ExportFormat::Csv,
            Some("md") | Some("markdown") => ExportFormat::Markdown,
            _ => ExportFormat::Json,
        }
    }
}

fn init_tracing(verbose: u8, no_color: bool) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "dineboard=info,dineboard_core=info",
        _ => "dineboard=debug,dineboard_core=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_dir().map(|d: PathBuf| d.join("dineboard")))
        .context("Could not determine data directory")?;

    let config_path = cli
        .config
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME));
    let mut config = ReportConfig::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

    let json = cli.format.as_deref() == Some("json");
    let no_color = cli.no_color;
    let command = cli.command.unwrap_or(Command::Summary);

    // Command-line limits win over the config file
    match &command {
        Command::TopFoods { limit: Some(n) } => config.top_foods_limit = *n,
        Command::Categories { limit } if limit.is_some() => config.category_limit = *limit,
        Command::Daily { days: Some(n) } => config.daily_days = *n,
        _ => {}
    }
    config.validate()?;

    let report = load_and_compute(&data_dir, &config).await?;

    match command {
        Command::Summary => println!("{}", cli::format_summary(&report, json, no_color)),
        Command::Revenue => println!("{}", cli::format_revenue(&report, json, no_color)),
        Command::TopFoods { .. } => {
            println!("{}", cli::format_top_foods(&report.top_foods, json, no_color))
        }
        Command::Categories { .. } => {
            println!("{}", cli::format_categories(&report.categories, json, no_color))
        }
        Command::Daily { .. } => println!("{}", cli::format_daily(&report.daily, json, no_color)),
        Command::Hourly => println!("{}", cli::format_hourly(&report.hourly, json, no_color)),
        Command::Status => println!("{}", cli::format_status(&report.status, json, no_color)),
        Command::Insights => println!("{}", cli::format_insights(&report.insights(), json)),
        Command::Export {
            output,
            export_format,
        } => run_export(&report, &output, export_format)?,
    }

    Ok(())
}

async fn load_and_compute(data_dir: &Path, config: &ReportConfig) -> Result<AnalyticsData> {
    let source = JsonDirSource::open(data_dir).map_err(|e| {
        let suggestion = LoadError::from_core_error("data_dir", &e).suggestion;
        match e {
            CoreError::DirectoryNotFound { path } => {
                cli::CliError::DataDirUnavailable { path, suggestion }
            }
            other => cli::CliError::from(other),
        }
    })?;

    let store = DataStore::from_config(config);
    let (dataset, load_report) = store.load(&source).await;

    for line in cli::format_load_warnings(&load_report) {
        eprintln!("{}", line);
    }
    if load_report.has_blocking_errors() {
        tracing::error!(dir = %data_dir.display(), "Orders and order items both failed to load");
    } else if dataset.has_no_sales() {
        tracing::warn!(dir = %data_dir.display(), "No orders or order items found");
    }

    Ok(AnalyticsData::compute(
        &dataset,
        config,
        chrono::Local::now(),
    ))
}

fn run_export(report: &AnalyticsData, output: &Path, format: Option<ExportFormat>) -> Result<()> {
    let format = format.unwrap_or_else(|| ExportFormat::from_path(output));

    match format {
        ExportFormat::Json => export_reports_to_json(report, output)?,
        ExportFormat::Csv => export_reports_to_csv(report, output)?,
        ExportFormat::Markdown => export_reports_to_markdown(report, output)?,
    }

    eprintln!("Exported {:?} report to {}", format, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("r.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("r.md")), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_path(Path::new("r.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("report")), ExportFormat::Json);
    }

    #[test]
    fn test_subcommand_flags_parse() {
        let cli = Cli::try_parse_from(["dineboard", "--format", "json", "top-foods", "-n", "3"])
            .unwrap();
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(matches!(cli.command, Some(Command::TopFoods { limit: Some(3) })));

        let cli = Cli::try_parse_from(["dineboard", "export", "-o", "out.csv", "--format", "csv"])
            .unwrap();
        match cli.command {
            Some(Command::Export {
                output,
                export_format,
            }) => {
                assert_eq!(output, PathBuf::from("out.csv"));
                assert_eq!(export_format, Some(ExportFormat::Csv));
            }
            _ => panic!("Expected export command"),
        }
    }
}

//! COVID-19 Dashboard CLI
//!
//! Command-line access to the same data and charts the dashboard serves:
//! - List countries
//! - Print totals for a selection
//! - Export Plotly figures
//! - Validate a dataset
//! - Check a running server

use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use covid_dashboard::charts::{Overview, PlotlyFigure};
use covid_dashboard::config::Config;
use covid_dashboard::dataset::{self, Dataset, DatasetProvider};
use covid_dashboard::layout::{render_data_table, render_fragment};
use covid_dashboard::selection::{Selection, SelectionHandler};

#[derive(Parser)]
#[command(name = "covid-dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the COVID-19 dashboard dataset and charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: first of the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Case time series of the selection
    TimeSeries,
    /// Totals bar chart of the selection
    Totals,
    /// Confirmed cases bubble map
    Map,
    /// Global totals bar chart
    GlobalTotals,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List countries in dropdown order
    Countries,

    /// Print per-condition totals for a selection
    Totals {
        /// Country name (default: Global)
        #[arg(long)]
        country: Option<String>,
    },

    /// Print a chart as Plotly figure JSON
    Chart {
        /// Country name (default: Global)
        #[arg(long)]
        country: Option<String>,
        /// Which chart to export
        #[arg(short, long, value_enum, default_value_t = ChartKind::TimeSeries)]
        kind: ChartKind,
    },

    /// Render the country table as HTML
    Table,

    /// Load the dataset and report what it contains
    Check,

    /// Show status of a running dashboard
    Status {
        /// Dashboard URL
        #[arg(long, default_value = "http://localhost:8050")]
        api_url: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Countries => {
            let dataset = load_dataset(cli.config.as_deref())?;
            let countries = dataset.list_countries();

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(countries)?);
                }
                OutputFormat::Table => {
                    for country in countries {
                        println!("{}", country);
                    }
                    println!();
                    println!("{} countries", countries.len());
                }
            }
        }

        Commands::Totals { country } => {
            let handler = SelectionHandler::new(load_dataset(cli.config.as_deref())?);
            let pair = handler.handle_selection(&Selection::from_value(country.as_deref()))?;

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&pair.summary)?);
                }
                OutputFormat::Table => {
                    println!("{}", pair.label);
                    println!("{}", "-".repeat(28));
                    for (condition, count) in pair.summary.iter() {
                        println!("{:<12} {:>15}", condition.label(), group_thousands(count));
                    }
                }
            }
        }

        Commands::Chart { country, kind } => {
            let dataset = load_dataset(cli.config.as_deref())?;

            let figure = match kind {
                ChartKind::Map => Overview::build(&dataset).bubble_map.to_figure(),
                ChartKind::GlobalTotals => Overview::build(&dataset).totals.to_figure(),
                ChartKind::TimeSeries | ChartKind::Totals => {
                    let handler = SelectionHandler::new(dataset);
                    let pair =
                        handler.handle_selection(&Selection::from_value(country.as_deref()))?;
                    if kind == ChartKind::TimeSeries {
                        pair.time_series.to_figure()
                    } else {
                        pair.totals.to_figure()
                    }
                }
            };

            // Figures are JSON whatever the output format
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }

        Commands::Table => {
            let dataset = load_dataset(cli.config.as_deref())?;
            println!("{}", render_fragment(&render_data_table(&dataset.country_table())));
        }

        Commands::Check => {
            let config = load_config(cli.config.as_deref())?;
            let dataset = dataset::load(&config.dataset)?;
            let totals = dataset.global_series().totals();

            match cli.format {
                OutputFormat::Json => {
                    let report = serde_json::json!({
                        "countries": dataset.list_countries().len(),
                        "records": dataset.record_count(),
                        "date_range": dataset.date_range(),
                        "global_totals": totals,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Table => {
                    println!("Dataset OK");
                    for path in config.dataset.paths() {
                        println!("  File: {}", path.display());
                    }
                    println!("  Countries: {}", dataset.list_countries().len());
                    println!("  Records: {}", dataset.record_count());
                    if let Some((first, last)) = dataset.date_range() {
                        println!("  Dates: {} to {}", first, last);
                    }
                    println!("  Global series points: {}", dataset.global_series().len());
                }
            }
        }

        Commands::Status { api_url } => {
            let client = reqwest::Client::new();
            let response = client.get(format!("{}/health", api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if cli.format == OutputFormat::Json {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!(
                        "COVID-19 Dashboard v{}",
                        health["version"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!(
                        "Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );

                    if let Some(dataset) = health.get("dataset") {
                        println!();
                        println!("Dataset:");
                        if let Some(countries) = dataset["countries"].as_u64() {
                            println!("  Countries: {}", countries);
                        }
                        if let Some(records) = dataset["records"].as_u64() {
                            println!("  Records: {}", records);
                        }
                        if let (Some(first), Some(last)) =
                            (dataset["first_date"].as_str(), dataset["last_date"].as_str())
                        {
                            println!("  Dates: {} to {}", first, last);
                        }
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Dashboard returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to the dashboard at {}", api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the dashboard server is running:");
                    eprintln!("  cargo run --bin covid-dashboard");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = covid_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Resolve config and start logging; logs go to stderr so stdout stays parseable
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    let (config, _) = Config::resolve(path)?;
    config.logging.init_with_writer(std::io::stderr)?;
    Ok(config)
}

fn load_dataset(path: Option<&Path>) -> Result<Arc<Dataset>, Box<dyn Error>> {
    let config = load_config(path)?;
    Ok(Arc::new(dataset::load(&config.dataset)?))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

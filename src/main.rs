use analytics::QuotingReport;
use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// The main entry point for the quote analyzer.
fn main() -> ExitCode {
    init_logging();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Analysis aborted.");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Charts a market maker's quotes, spread, inventory and skew from the
/// simulator's trades.csv, book.csv and quotes.csv.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML file overriding input/output paths and chart settings.
    /// Without it, `analysis.toml` in the working directory is used if present.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = configuration::load_config(cli.config.as_deref())?;

    let outcome = pipeline::run(&config)?;

    println!("{}", summary_table(&outcome.report));
    if let Some(path) = &outcome.summary_path {
        println!("Summary written to {}", path.display());
    }
    println!(
        "Analysis complete. Saved to {}",
        outcome.chart_path.display()
    );
    Ok(())
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders the quoting summary as a two-column table.
fn summary_table(report: &QuotingReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);

    let rows = [
        ("Trades", report.trade_count.to_string()),
        ("Traded volume", fmt_opt(report.traded_volume)),
        ("Book snapshots", report.book_rows.to_string()),
        ("Quotes", report.quote_rows.to_string()),
        ("Mean spread", fmt_opt(report.mean_spread)),
        ("Min spread", fmt_opt(report.min_spread)),
        ("Max spread", fmt_opt(report.max_spread)),
        ("Final inventory", fmt_opt(report.final_inventory)),
        ("Max |inventory|", fmt_opt(report.max_abs_inventory)),
        ("Mean skew", fmt_opt(report.mean_skew)),
        ("Mean |skew|", fmt_opt(report.mean_abs_skew)),
        ("Mean join distance", fmt_opt(report.mean_join_distance)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    table
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paysplit::application::engine::AllocationEngine;
use paysplit::config::{EngineConfig, POINTS_METHOD_ID};
use paysplit::domain::ports::RecordSourceBox;
use paysplit::interfaces::json::record_reader::JsonFileSource;
use paysplit::interfaces::report::summary_writer::SummaryWriter;
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use tracing::warn;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orders JSON file
    orders: PathBuf,

    /// Payment methods JSON file
    methods: PathBuf,

    /// Id of the loyalty points method
    #[arg(long, default_value = POINTS_METHOD_ID)]
    points_method: String,

    /// Only methods with a discount above this percentage take part in the promotional pass
    #[arg(long, default_value_t = 10)]
    promo_threshold: i32,

    /// Minimum share of an order's value paid with points in a mixed payment
    #[arg(long, default_value = "0.10")]
    min_points_share: Decimal,

    /// Output format of the per-method totals
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also print the payments of every order
    #[arg(long)]
    breakdown: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source: RecordSourceBox = Box::new(JsonFileSource::new(cli.orders, cli.methods));
    let orders = source.orders().into_diagnostic()?;
    let methods = source.methods().into_diagnostic()?;

    let config = EngineConfig {
        points_method: cli.points_method,
        promo_threshold: cli.promo_threshold,
        min_points_share: cli.min_points_share,
    };
    let mut engine = AllocationEngine::new(&methods, config).into_diagnostic()?;
    engine.allocate(&orders).into_diagnostic()?;
    let ledger = engine.into_ledger();

    for order in ledger.unsettled(orders.iter().map(|o| o.id.as_str())) {
        warn!(order, "order left unpaid");
    }

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    match cli.format {
        Format::Text => writer.write_totals(&ledger),
        Format::Csv => writer.write_totals_csv(&ledger),
    }
    .into_diagnostic()?;
    if cli.breakdown {
        writer.write_breakdown(&ledger).into_diagnostic()?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

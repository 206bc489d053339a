use std::{error::Error, fs, path::PathBuf, process::exit};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finreport::{DateBounds, DocumentExporter, Report, Transaction};

/// A utility for generating report exports from a JSON transaction snapshot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON array of transactions.
    #[arg(long, short)]
    input_path: PathBuf,

    /// File path to write the export artifact to.
    #[arg(long, short)]
    output_path: PathBuf,

    /// Inclusive start bound in YYYY-MM-DD form.
    #[arg(long)]
    start: Option<String>,

    /// Inclusive end bound in YYYY-MM-DD form.
    #[arg(long)]
    end: Option<String>,

    /// The export artifact to produce.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// The opening balance the running balance trend starts from.
    #[arg(long, default_value_t = 0.0)]
    opening_balance: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// The tabular export (transactions.csv).
    Csv,
    /// The printable document with embedded charts.
    Document,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    if args.output_path.is_file() {
        eprintln!("File already exists at {:#?}!", args.output_path);
        exit(1);
    }

    let snapshot_text = fs::read_to_string(&args.input_path)?;
    let snapshot: Vec<Transaction> = serde_json::from_str(&snapshot_text)?;
    tracing::info!("loaded {} transactions", snapshot.len());

    let bounds = DateBounds::parse(args.start.as_deref(), args.end.as_deref());
    let report = Report::with_opening_balance(&snapshot, bounds, args.opening_balance);

    let artifact = match args.format {
        Format::Csv => report.to_csv()?,
        Format::Document => DocumentExporter::new().export(&report).await?,
    };

    fs::write(&args.output_path, artifact)?;

    println!(
        "Wrote {} of {} transactions to {:#?}",
        match args.format {
            Format::Csv => "CSV export",
            Format::Document => "document export",
        },
        report.transactions().len(),
        args.output_path
    );

    Ok(())
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(filter::LevelFilter::INFO))
        .init();
}

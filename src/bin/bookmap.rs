use anyhow::Result;
use bookmap::{legend, storage, Client};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bookmap",
    version,
    about = "Fetch, export & summarize the bookstore directory"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the directory (and optionally save it and print a summary).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Directory endpoint URL (defaults to the deployed endpoint).
    #[arg(long)]
    endpoint: Option<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-type legend counts to stdout.
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let client = match args.endpoint {
        Some(url) => Client::with_endpoint(url),
        None => Client::default(),
    };
    let snapshot = client.fetch_directory()?;
    eprintln!("Fetched {} stores", snapshot.len());

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&snapshot, path)?,
            "json" => storage::save_json(&snapshot, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", snapshot.len(), path.display());
    }

    if args.summary {
        let types = legend::derive_types(&snapshot);
        let colors = legend::assign_colors(&types, &legend::DEFAULT_PALETTE);
        for entry in legend::build_legend_entries(&snapshot, &colors) {
            println!(
                "{}  count={}  color=#{:02x}{:02x}{:02x}",
                entry.label, entry.count, entry.color.r, entry.color.g, entry.color.b
            );
        }
    }

    Ok(())
}

use anyhow::Context;
use cass_snapshot_link::utils::DEFAULT_DATA_DIR;
use cass_snapshot_link::{run, LinkOptions, TracingReporter};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Link Cassandra snapshot directories into a tree organised by snapshot name
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the snapshot to link. Required unless --all-snapshots is set.
    #[arg(required_unless_present = "all_snapshots")]
    snapshot_name: Option<String>,

    /// Cassandra data directory to scan for snapshots
    #[arg(long, env = "CASS_SNAPSHOT_LINK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory to build the link tree in. Defaults to the data directory.
    #[arg(long, env = "CASS_SNAPSHOT_LINK_LINK_DIR")]
    link_dir: Option<PathBuf>,

    /// Only link snapshots from this keyspace. May be given more than once.
    #[arg(long = "keyspace", value_name = "KEYSPACE")]
    keyspaces: Vec<String>,

    /// Link every snapshot found instead of a single named one
    #[arg(long)]
    all_snapshots: bool,

    /// Replace links that already exist
    #[arg(long)]
    replace_links: bool,

    /// Show what would be linked without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Log level filter, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not log to the console
    #[arg(long)]
    no_console_log: bool,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("Invalid log level '{}'", args.log_level))?;

    let console = (!args.no_console_log).then(|| fmt::layer().with_writer(std::io::stderr));

    let file = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn link(args: Args) -> anyhow::Result<()> {
    let mut options = LinkOptions::from_args(
        args.snapshot_name,
        args.all_snapshots,
        args.data_dir,
        args.link_dir,
        args.keyspaces,
    )?;
    options.replace_existing = args.replace_links;
    options.dry_run = args.dry_run;

    let summary = run(&options, &TracingReporter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(&args) {
        eprintln!("error: {:#}", err);
        return ExitCode::FAILURE;
    }

    match link(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

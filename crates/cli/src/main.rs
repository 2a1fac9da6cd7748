use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use inventory::FileInventory;
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use taskfinder_protocol::{
    schema_json, serialize_json_pretty, AnalysisFile, DatabaseInstance, InventoryFile,
};
use taskfinder_search::{
    ClusterNameInferencer, FileAnalysisSource, Inventory, SearchConfig, TaskFinder,
};

mod inventory;
mod report;

const INVENTORY_ENV: &str = "TASKFINDER_INVENTORY";
const CONFIG_ENV: &str = "TASKFINDER_CONFIG";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "taskfinder")]
#[command(about = "Find the cluster tasks most likely to reach a database", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Inventory snapshot (overrides TASKFINDER_INVENTORY)
    #[arg(long, global = true)]
    inventory: Option<PathBuf>,

    /// Search config TOML (overrides TASKFINDER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Analysis hints file (default: <temp dir>/taskfinder-analysis.json)
    #[arg(long, global = true)]
    analysis: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the tasks most likely to reach a database
    Find(FindArgs),

    /// Show how clusters rank against a database identifier
    Clusters(ClustersArgs),

    /// Print the JSON schema of an input file format
    Schema(SchemaArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Database identifier as listed in the inventory
    database: String,

    /// Show at most this many candidates
    #[arg(long)]
    limit: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ClustersArgs {
    /// Database identifier to compare cluster names against
    database: String,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SchemaArgs {
    #[arg(value_enum)]
    format: SchemaFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaFormat {
    Inventory,
    Analysis,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Find(args) => args.json,
        Commands::Clusters(args) => args.json,
        Commands::Schema(_) => true,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match &cli.command {
        Commands::Find(args) => run_find(&cli, args).await,
        Commands::Clusters(args) => run_clusters(&cli, args).await,
        Commands::Schema(args) => run_schema(args),
    }
}

async fn run_find(cli: &Cli, args: &FindArgs) -> Result<()> {
    let inventory = Arc::new(load_inventory(cli).await?);
    let database = resolve_database(inventory.file(), &args.database)?;
    let analysis = cli
        .analysis
        .as_ref()
        .map_or_else(FileAnalysisSource::default_location, FileAnalysisSource::new);
    log::debug!("Analysis hints from {}", analysis.path().display());

    let finder = TaskFinder::new(inventory)
        .with_analysis(Arc::new(analysis))
        .with_config(load_config(cli)?)?;
    log::debug!("Search config: {:?}", finder.config());
    let mut outcome = finder
        .search(&database)
        .await
        .with_context(|| format!("Search for {} failed", database.identifier))?;

    if args.json {
        if let Some(limit) = args.limit {
            outcome.results.truncate(limit);
        }
        return print_stdout(&serialize_json_pretty(&outcome)?);
    }
    print_stdout(&report::render_outcome(
        &database.identifier,
        &outcome,
        args.limit,
    ))
}

async fn run_clusters(cli: &Cli, args: &ClustersArgs) -> Result<()> {
    let inventory = load_inventory(cli).await?;
    let clusters = inventory
        .list_clusters()
        .await
        .context("Cluster listing failed")?;
    let ranked = ClusterNameInferencer::rank(&args.database, &clusters);

    if args.json {
        return print_stdout(&serialize_json_pretty(&ranked)?);
    }
    print_stdout(&report::render_clusters(&args.database, &ranked))
}

fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = match args.format {
        SchemaFormat::Inventory => schema_json::<InventoryFile>()?,
        SchemaFormat::Analysis => schema_json::<AnalysisFile>()?,
    };
    print_stdout(&schema)
}

async fn load_inventory(cli: &Cli) -> Result<FileInventory> {
    let path = cli
        .inventory
        .clone()
        .or_else(|| env::var_os(INVENTORY_ENV).map(PathBuf::from))
        .ok_or_else(|| anyhow!("No inventory given (use --inventory or {INVENTORY_ENV})"))?;
    FileInventory::load(&path).await
}

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => SearchConfig::load(&path)
            .with_context(|| format!("Cannot load config {}", path.display())),
        None => Ok(SearchConfig::default()),
    }
}

fn resolve_database(inventory: &InventoryFile, identifier: &str) -> Result<DatabaseInstance> {
    inventory
        .database(identifier)
        .cloned()
        .ok_or_else(|| anyhow!("Database {identifier} not found in inventory"))
}

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use module_guide::guide::{GuideOptions, ModuleGuide, load_guide};
use module_guide::store::{FileStore, KeyValueStore};
use module_guide::{App, Config};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "guide")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Guide markdown file (defaults to guide_path from config.json)
    #[arg(short, long, global = true)]
    guide: Option<PathBuf>,

    /// Use a different config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress and the state of every module
    Status,
    /// List module identifiers and titles
    List,
    /// Clear all completed modules
    Reset,
    /// Print config, storage and log locations
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the TUI owns the terminal, so it logs to a file
    init_logging(cli.command.is_none())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(Commands::Path) = cli.command {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::config_path()?,
        };
        println!("config:  {}", config_path.display());
        println!("storage: {}", Config::store_path()?.display());
        println!("log:     {}", Config::log_path()?.display());
        return Ok(());
    }

    let guide_path = cli
        .guide
        .clone()
        .or_else(|| config.guide_path.clone())
        .context("No guide given. Pass --guide <FILE> or set guide_path in config.json")?;
    let document = load_guide(&guide_path)?;

    let store = FileStore::open(Config::store_path()?)?;
    let mut guide = ModuleGuide::new(document, store, GuideOptions::from(&config));

    match cli.command {
        None => {
            // Launch TUI; without a root container it shows a placeholder
            guide.init();
            let mut app = App::new(config, guide)?;
            app.run().await?;
        }
        Some(Commands::Status) => {
            require_root(&mut guide, &guide_path)?;
            print_status(&guide);
        }
        Some(Commands::List) => {
            require_root(&mut guide, &guide_path)?;
            for card in guide.cards() {
                println!("{:<24} {}", card.id, card.title);
            }
        }
        Some(Commands::Reset) => {
            require_root(&mut guide, &guide_path)?;
            guide.reset_progress();
            println!("Progress cleared ({})", guide.progress().label());
        }
        Some(Commands::Path) => {}
    }

    Ok(())
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "module_guide=info".into());

    if to_file {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn require_root<S: KeyValueStore>(guide: &mut ModuleGuide<S>, path: &Path) -> Result<()> {
    if !guide.init() {
        bail!("{:?} has no top-level '# Title' heading", path);
    }
    Ok(())
}

fn print_status<S>(guide: &ModuleGuide<S>) {
    let title = guide.document().map(|d| d.title.as_str()).unwrap_or_default();
    let progress = guide.progress();

    println!("{title}: {} ({}/{})", progress.label(), progress.completed, progress.total);
    for (index, card) in guide.cards().iter().enumerate() {
        let mark = if guide.is_completed(index) { "[✓]" } else { "[ ]" };
        println!("  {mark} {:02}. {} ({})", card.number, card.title, card.id);
    }
    if progress.banner_visible() {
        println!("All modules complete.");
    }
}

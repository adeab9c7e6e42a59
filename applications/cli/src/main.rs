//! Groove - terminal music player
use clap::{Parser, Subcommand};
use groove_cli::{render, repl, GrooveConfig, Player};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groove")]
#[command(about = "Groove Player - playlists, search, shuffle and repeat in your terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./groove.toml if present)
    #[arg(short, long, global = true, env = "GROOVE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Read the catalog from a JSON file
    #[arg(long, conflicts_with = "dir")]
    catalog: Option<PathBuf>,

    /// Scan a music directory (one playlist per sub-directory)
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player
    Play {
        #[command(flatten)]
        source: CatalogArgs,

        /// Simulated playback speed (media seconds per second)
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Print playlists and tracks
    List {
        #[command(flatten)]
        source: CatalogArgs,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "groove_cli=info,groove_playback=info,groove_catalog=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { source, speed } => {
            let config = load_config(cli.config, &source)?;
            play(&config, speed)?;
        }
        Commands::List { source, json } => {
            let config = load_config(cli.config, &source)?;
            list(&config, json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>, source: &CatalogArgs) -> anyhow::Result<GrooveConfig> {
    let mut config = GrooveConfig::load(path.as_deref())?;

    if let Some(catalog) = &source.catalog {
        config.use_json_catalog(catalog.clone());
    } else if let Some(dir) = &source.dir {
        config.use_directory_catalog(dir.clone());
    }

    config.validate()?;
    Ok(config)
}

fn play(config: &GrooveConfig, speed: f64) -> anyhow::Result<()> {
    tracing::info!(
        "Starting Groove with {:?} catalog at {}",
        config.catalog.source,
        config.catalog.path.display()
    );

    let mut player = Player::new(config.catalog_provider(), config.session_config(), speed);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(&mut player, stdin.lock(), stdout.lock())?;

    Ok(())
}

fn list(config: &GrooveConfig, json: bool) -> anyhow::Result<()> {
    let catalog = config.catalog_provider().load();

    if json {
        println!("{}", groove_catalog::to_json_string(&catalog)?);
    } else {
        println!("{}", render::catalog(&catalog).trim_end());
    }

    Ok(())
}

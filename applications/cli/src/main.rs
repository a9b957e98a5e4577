/// Tempo - music library and player state from the command line
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tempo_cli::{
    commands::{self, PreferenceChanges},
    TempoConfig,
};
use tempo_core::RepeatMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "Tempo music library and player preferences", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TEMPO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every track in the music directory
    Scan {
        /// Directory to scan instead of the configured one
        dir: Option<PathBuf>,
    },
    /// Find tracks by title, artist, or album
    Search {
        /// Text to look for (case-insensitive)
        query: String,
        /// Directory to scan instead of the configured one
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// List artists in the music directory
    Artists {
        /// Directory to scan instead of the configured one
        dir: Option<PathBuf>,
    },
    /// Show or change saved player preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Print saved preferences
    Show,
    /// Change saved preferences
    Set {
        /// Volume (0.0 - 1.0)
        #[arg(long)]
        volume: Option<f32>,
        /// Repeat mode (none, one, all)
        #[arg(long, value_parser = parse_repeat_mode)]
        repeat: Option<RepeatMode>,
        /// Shuffle on or off
        #[arg(long)]
        shuffle: Option<bool>,
    },
    /// Forget saved preferences
    Reset,
}

fn parse_repeat_mode(value: &str) -> Result<RepeatMode, String> {
    RepeatMode::parse(value).ok_or_else(|| format!("expected none, one, or all, got {}", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo=info,tempo_cli=info,tempo_library=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = TempoConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Scan { dir } => commands::scan(&config, dir, &mut out).await?,
        Commands::Search { query, dir } => {
            commands::search(&config, dir, &query, &mut out).await?;
        }
        Commands::Artists { dir } => commands::artists(&config, dir, &mut out).await?,
        Commands::Prefs { command } => match command {
            PrefsCommands::Show => commands::prefs_show(&config, &mut out).await?,
            PrefsCommands::Set {
                volume,
                repeat,
                shuffle,
            } => {
                let changes = PreferenceChanges {
                    volume,
                    repeat_mode: repeat,
                    shuffled: shuffle,
                };
                commands::prefs_set(&config, changes, &mut out).await?;
            }
            PrefsCommands::Reset => commands::prefs_reset(&config, &mut out).await?,
        },
        Commands::Config => commands::show_config(&config, &mut out)?,
    }

    Ok(())
}

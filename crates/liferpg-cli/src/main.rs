use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "liferpg", version, about = "Life RPG daily quest CLI")]
struct Cli {
    /// Use this config file instead of the one in the data directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (same as RUST_LOG=debug for liferpg)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the quest table
    Quests {
        #[command(subcommand)]
        action: commands::quest::QuestAction,
    },
    /// Calendar export
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Daily summary notification
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Export the calendar and push the summary (for a daily scheduler)
    Daily(commands::daily::DailyArgs),
    /// Score a day's completions
    Score(commands::score::ScoreArgs),
    /// Show level for an XP total
    Level(commands::score::LevelArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Create the data directory and print phone setup steps
    Setup,
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "liferpg=debug,liferpg_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = commands::ConfigSource::new(cli.config);
    let result = match cli.command {
        Commands::Quests { action } => commands::quest::run(action, &source),
        Commands::Calendar { action } => commands::calendar::run(action, &source),
        Commands::Notify { action } => commands::notify::run(action, &source),
        Commands::Daily(args) => commands::daily::run(args, &source),
        Commands::Score(args) => commands::score::run(args, &source),
        Commands::Level(args) => commands::score::run_level(args),
        Commands::Config { action } => commands::config::run(action, &source),
        Commands::Setup => commands::setup::run(&source),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "liferpg", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

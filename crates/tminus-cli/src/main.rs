use clap::{Parser, Subcommand};

mod commands;
mod display;
mod logging;

#[derive(Parser)]
#[command(name = "tminus", version, about = "Countdowns to natural, calendar and cosmic events")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the event catalog and project single events
    Events {
        #[command(subcommand)]
        action: commands::events::EventsAction,
    },
    /// Live countdown; type an event id to switch, `q` to quit
    Watch(commands::watch::WatchArgs),
    /// Resolve the observer location from the IP lookup
    Locate {
        /// Print the fix as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Events { action } => commands::events::run(action),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Locate { json } => commands::locate::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

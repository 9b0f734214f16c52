use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, history, watch};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "vidrail")]
#[command(about = "vidrail - Browse a public video catalog and keep your watch history local")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the most popular videos
    #[command(long_about = "Fetch the catalog's most-popular chart for the configured region and render it as a gallery listing.")]
    Browse {
        /// Number of videos to fetch (overrides the configured default)
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
    },

    /// Open a video: record it in watch history and show a recommendation rail
    #[command(long_about = "Record the video in locally persisted watch history (fetching its real title and thumbnail first) and render a rail of recommended videos. The two fetches are independent; a broken rail never loses the recorded watch.")]
    Watch {
        /// Catalog id of the video
        id: String,

        /// Do not record this view in watch history
        #[arg(long, action = ArgAction::SetTrue)]
        no_record: bool,
    },

    /// Show or edit locally persisted watch history
    #[command(long_about = "List watched videos most-recent-first. Use --remove to drop a single entry or --clear to wipe the whole history.")]
    History {
        /// Remove a single entry by video id
        #[arg(long, value_name = "ID", conflicts_with = "clear")]
        remove: Option<String>,

        /// Clear all watch history
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,

        /// Skip the confirmation prompt for --clear
        #[arg(long, action = ArgAction::SetTrue, requires = "clear")]
        yes: bool,
    },

    /// View or update configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Update configuration values
    Set {
        /// Catalog API key
        #[arg(long)]
        api_key: Option<String>,

        /// Two-letter region code for the most-popular chart
        #[arg(long)]
        region: Option<String>,

        /// Gallery page size (1-50)
        #[arg(long)]
        max_results: Option<u32>,

        /// Recommendation rail size (1-50)
        #[arg(long)]
        rail_size: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse { limit } => browse::run_browse(limit, &output).await,
        Commands::Watch { id, no_record } => watch::run_watch(&id, no_record, &output).await,
        Commands::History { remove, clear, yes } => {
            history::run_history(remove, clear, yes, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}

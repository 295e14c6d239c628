mod app_state;
mod commands;
mod config;

use crate::config::CONFIG;
use clap::{Parser, Subcommand, ValueEnum};

/// Trip planning from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tripmind", about = "Find destinations and plan trips")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search places on the map. Later queries supersede earlier ones.
    Search {
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// The quick search form on the home page.
    QuickSearch { query: String },
    /// List the preset destinations or zoom to one of them.
    Preset { name: Option<String> },
    /// Show the detail page of a country.
    Destination {
        country: String,
        /// Arrive from the community page, passing the country card along.
        #[arg(long)]
        via_community: bool,
    },
    /// Browse community destinations.
    Community {
        query: Option<String>,
        /// Search every country instead of the featured ones.
        #[arg(long)]
        worldwide: bool,
    },
    /// Edit the persisted trip planner draft.
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Edit the persisted plan-trip draft.
    PlanTrip {
        #[command(subcommand)]
        action: PlanTripAction,
    },
    /// Jot down notes for this session and list them.
    Notes {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Share a travel story.
    Share {
        #[arg(long)]
        name: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        story: String,
        /// An image to attach.
        #[arg(long)]
        photo: Option<std::path::PathBuf>,
    },
    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Send a message through the about page.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Show the team and what TripMind offers.
    About,
    /// Resolve a path to the page it shows.
    Route { path: String },
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    /// Print the draft and any validation errors.
    Show,
    /// Change one field.
    Set { field: PlanField, value: String },
    /// Validate and print the trip summary.
    Submit,
    /// Reset the form and the saved draft.
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlanField {
    Destination,
    StartDate,
    EndDate,
    Budget,
    Notes,
}

#[derive(Subcommand, Debug)]
enum PlanTripAction {
    Show,
    Set { field: PlanTripFieldArg, value: String },
    /// Select or deselect an interest.
    Toggle { interest: String },
    Submit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlanTripFieldArg {
    Destination,
    StartDate,
    EndDate,
    Budget,
}

fn main() {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(CONFIG.general.log_level.to_level_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let cli = Cli::parse();
    let app_state = app_state::AppState::new();

    if let Err(e) = commands::run(cli.command, &app_state) {
        log::error!("Command failed. Reason:\r\n{}", e);
        std::process::exit(1);
    }
}

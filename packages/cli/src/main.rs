#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the basketball-reference roster scraper.
//!
//! Uses `indicatif-log-bridge` (via [`hoops_ref_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal. Results are
//! printed to stdout as pretty JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hoops_ref_cli::fetch::Fetcher;
use hoops_ref_cli::parse_teams;
use hoops_ref_cli::pipeline::{self, InvalidDelay, LeagueSettings, Pacer};
use hoops_ref_player_models::Team;
use hoops_ref_scraper::urls::DEFAULT_SEASON;
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "hoops_ref",
    about = "Roster and per-season statistics scraper for basketball-reference.com"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PacingArgs {
    /// Minimum pause between requests, in seconds
    #[arg(long, default_value_t = 2.0)]
    min_delay_secs: f64,
    /// Maximum pause between requests, in seconds
    #[arg(long, default_value_t = 5.0)]
    max_delay_secs: f64,
}

impl PacingArgs {
    fn pacer(&self) -> Result<Pacer, InvalidDelay> {
        Pacer::new(self.min_delay_secs, self.max_delay_secs)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List franchise codes
    Teams,
    /// Print the player page URLs on each team's roster
    Links {
        /// Season-ending year (e.g. "2025" for 2024-25)
        #[arg(long, default_value = DEFAULT_SEASON)]
        season: String,
        /// Comma-separated franchise codes (default: all teams)
        #[arg(long)]
        teams: Option<String>,
        #[command(flatten)]
        pacing: PacingArgs,
    },
    /// Fetch and parse a single player page
    Player {
        /// Full player page URL
        url: String,
        /// Franchise code of the roster the player belongs to
        #[arg(long)]
        team: String,
    },
    /// Scrape every rostered player for the selected teams
    League {
        /// Season-ending year (e.g. "2025" for 2024-25)
        #[arg(long, default_value = DEFAULT_SEASON)]
        season: String,
        /// Comma-separated franchise codes (default: all teams)
        #[arg(long)]
        teams: Option<String>,
        /// Maximum number of players per team (for testing)
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        pacing: PacingArgs,
    },
    /// Parse a saved roster page without touching the network
    ParseRoster {
        /// Path to the saved HTML file
        file: PathBuf,
        /// Franchise code of the roster
        #[arg(long)]
        team: String,
    },
    /// Parse a saved player page without touching the network
    ParsePlayer {
        /// Path to the saved HTML file
        file: PathBuf,
        /// Franchise code of the roster the player belongs to
        #[arg(long)]
        team: String,
    },
}

fn selected_teams(list: Option<&str>) -> Result<Vec<Team>, String> {
    list.map_or_else(|| Ok(Team::all().to_vec()), parse_teams)
}

fn single_team(code: &str) -> Result<Team, String> {
    match parse_teams(code)?.as_slice() {
        [team] => Ok(*team),
        _ => Err(format!("Expected exactly one team code, got '{code}'")),
    }
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let multi = hoops_ref_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Teams => {
            println!("{:<6} NAME", "CODE");
            println!("{}", "-".repeat(30));
            for team in Team::all() {
                println!("{:<6} {}", team.code(), team.full_name());
            }
        }
        Commands::Links {
            season,
            teams,
            pacing,
        } => {
            let teams = selected_teams(teams.as_deref())?;
            let pacer = pacing.pacer()?;
            let fetcher = Fetcher::from_env()?;
            let links = pipeline::league_links(&fetcher, &teams, &season, &pacer, &multi).await;
            print_json(&serde_json::to_value(links)?)?;
        }
        Commands::Player { url, team } => {
            let team = single_team(&team)?;
            let fetcher = Fetcher::from_env()?;
            let player = pipeline::fetch_player(&fetcher, &url, team).await?;
            print_json(&serde_json::to_value(player)?)?;
        }
        Commands::League {
            season,
            teams,
            limit,
            pacing,
        } => {
            let settings = LeagueSettings {
                season,
                teams: selected_teams(teams.as_deref())?,
                limit,
                pacer: pacing.pacer()?,
            };
            log::info!(
                "Scraping {} teams for the {} season",
                settings.teams.len(),
                settings.season
            );
            let fetcher = Fetcher::from_env()?;
            let report = pipeline::scrape_league(&fetcher, &settings, &multi).await;
            print_json(&serde_json::to_value(report.players)?)?;
        }
        Commands::ParseRoster { file, team } => {
            let team = single_team(&team)?;
            let html = std::fs::read_to_string(&file)?;
            let links = pipeline::links_from_html(&html, team)?;
            print_json(&serde_json::to_value(BTreeMap::from([(team, links)]))?)?;
        }
        Commands::ParsePlayer { file, team } => {
            let team = single_team(&team)?;
            let html = std::fs::read_to_string(&file)?;
            let player = pipeline::player_from_html(&html, team)?;
            print_json(&serde_json::to_value(player)?)?;
        }
    }

    Ok(())
}

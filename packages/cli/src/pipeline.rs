//! League-wide orchestration over rosters and player pages.
//!
//! Fetches each team's roster page, extracts its player links, then fetches
//! and parses every player page in turn. Requests are strictly sequential
//! with a randomized pause between them. A team or player that fails is
//! logged and recorded as a [`Failure`]; the rest of the run continues.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hoops_ref_cli_utils::{IndicatifProgress, MultiProgress, ProgressCallback};
use hoops_ref_player_models::{Player, Team};
use hoops_ref_scraper::ScrapeError;
use hoops_ref_scraper::player::parse_player;
use hoops_ref_scraper::roster::extract_roster_links;
use hoops_ref_scraper::urls::{is_player_url, roster_url};
use rand::Rng;
use scraper::Html;

use crate::fetch::{FetchError, Fetcher};

/// Errors from fetching and parsing a single page.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page was fetched but could not be parsed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The URL does not point at a player page on the site.
    #[error("{0} is not a player page URL")]
    NotPlayerPage(String),
}

/// Delay bounds that cannot be sampled.
#[derive(Debug, thiserror::Error)]
#[error("delay bounds must be finite and non-negative, got {min_secs}..={max_secs}")]
pub struct InvalidDelay {
    /// Requested lower bound, in seconds.
    pub min_secs: f64,
    /// Requested upper bound, in seconds.
    pub max_secs: f64,
}

/// Randomized delay between consecutive requests.
#[derive(Debug, Clone)]
pub struct Pacer {
    bounds: RangeInclusive<f64>,
}

impl Pacer {
    /// Creates a pacer drawing delays uniformly from `[min_secs, max_secs]`.
    /// Bounds are swapped if given in the wrong order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDelay`] if either bound is negative, NaN, or
    /// infinite.
    pub fn new(min_secs: f64, max_secs: f64) -> Result<Self, InvalidDelay> {
        let valid = |secs: f64| secs.is_finite() && secs >= 0.0;
        if !valid(min_secs) || !valid(max_secs) {
            return Err(InvalidDelay { min_secs, max_secs });
        }

        Ok(Self {
            bounds: min_secs.min(max_secs)..=min_secs.max(max_secs),
        })
    }

    /// Draws the next delay.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.bounds.clone());
        Duration::from_secs_f64(secs)
    }

    /// Sleeps for a freshly drawn delay.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            log::trace!("Sleeping {:.2}s before next request", delay.as_secs_f64());
            tokio::time::sleep(delay).await;
        }
    }
}

/// Settings for a league-wide run.
#[derive(Debug, Clone)]
pub struct LeagueSettings {
    /// Season-ending year selecting which roster pages to read.
    pub season: String,
    /// Teams to visit, in order.
    pub teams: Vec<Team>,
    /// Maximum number of players to fetch per team.
    pub limit: Option<usize>,
    /// Pause between requests.
    pub pacer: Pacer,
}

/// A team or player that could not be scraped.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Roster being processed when the failure happened.
    pub team: Team,
    /// The player page, or `None` when the roster itself failed.
    pub url: Option<String>,
    /// Rendered error message.
    pub error: String,
}

/// Outcome of [`scrape_league`].
#[derive(Debug, Default)]
pub struct LeagueReport {
    /// Parsed players per team, in roster link order.
    pub players: BTreeMap<Team, Vec<Player>>,
    /// Pages skipped during the run.
    pub failures: Vec<Failure>,
}

/// Fetches `team`'s roster page for `season` and returns its player URLs.
///
/// # Errors
///
/// Returns [`PipelineError`] if the page cannot be fetched or has no
/// roster table.
pub async fn team_links(
    fetcher: &Fetcher,
    team: Team,
    season: &str,
) -> Result<BTreeSet<String>, PipelineError> {
    let url = roster_url(team, season);
    let body = fetcher.fetch_html(&url).await?;
    links_from_html(&body, team).map_err(|e| PipelineError::from(e.in_page(&url)))
}

/// Fetches and parses one player page.
///
/// # Errors
///
/// Returns [`PipelineError::NotPlayerPage`] without making a request if
/// `url` is not a player page, otherwise [`PipelineError`] if the page
/// cannot be fetched or parsed.
pub async fn fetch_player(
    fetcher: &Fetcher,
    url: &str,
    team: Team,
) -> Result<Player, PipelineError> {
    if !is_player_url(url) {
        return Err(PipelineError::NotPlayerPage(url.to_owned()));
    }
    let body = fetcher.fetch_html(url).await?;
    player_from_html(&body, team).map_err(|e| PipelineError::from(e.in_page(url)))
}

/// Parses roster page HTML into player URLs.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the page has no roster table.
pub fn links_from_html(html: &str, team: Team) -> Result<BTreeSet<String>, ScrapeError> {
    extract_roster_links(&Html::parse_document(html), team)
}

/// Parses player page HTML into a [`Player`].
///
/// # Errors
///
/// Returns [`ScrapeError`] if the page is missing or has malformed parts.
pub fn player_from_html(html: &str, team: Team) -> Result<Player, ScrapeError> {
    parse_player(&Html::parse_document(html), team)
}

/// Collects player URLs for every team in `teams`. Teams whose roster
/// fails are logged and left out.
pub async fn league_links(
    fetcher: &Fetcher,
    teams: &[Team],
    season: &str,
    pacer: &Pacer,
    multi: &MultiProgress,
) -> BTreeMap<Team, BTreeSet<String>> {
    let progress =
        IndicatifProgress::teams_bar(multi, "Retrieving player links", teams.len() as u64);
    let mut links = BTreeMap::new();

    for (i, team) in teams.iter().enumerate() {
        if i > 0 {
            pacer.pause().await;
        }
        progress.set_message(format!("Retrieving player links ({team})"));

        match team_links(fetcher, *team, season).await {
            Ok(found) => {
                links.insert(*team, found);
            }
            Err(e) => log::warn!("Skipping {team}: {e}"),
        }
        progress.inc(1);
    }

    progress.finish(format!("Retrieved links for {} teams", links.len()));
    links
}

/// Scrapes every rostered player of every team in `settings`.
pub async fn scrape_league(
    fetcher: &Fetcher,
    settings: &LeagueSettings,
    multi: &MultiProgress,
) -> LeagueReport {
    let start = Instant::now();
    let teams_progress =
        IndicatifProgress::teams_bar(multi, "Teams", settings.teams.len() as u64);
    let mut report = LeagueReport::default();

    for (i, team) in settings.teams.iter().enumerate() {
        if i > 0 {
            settings.pacer.pause().await;
        }
        teams_progress.set_message(format!("Teams ({team})"));

        let players_progress =
            IndicatifProgress::players_bar(multi, &format!("{} roster", team.full_name()));
        scrape_team(fetcher, *team, settings, &players_progress, &mut report).await;
        players_progress.finish_and_clear();

        teams_progress.inc(1);
    }

    let total: usize = report.players.values().map(Vec::len).sum();
    teams_progress.finish(format!("Scraped {total} players"));

    log::info!(
        "Scraped {total} players from {} teams in {:.1}s",
        report.players.len(),
        start.elapsed().as_secs_f64()
    );
    if !report.failures.is_empty() {
        log::warn!("{} pages failed:", report.failures.len());
        for failure in &report.failures {
            log::warn!(
                "  {} {}: {}",
                failure.team,
                failure.url.as_deref().unwrap_or("(roster)"),
                failure.error
            );
        }
    }

    report
}

async fn scrape_team(
    fetcher: &Fetcher,
    team: Team,
    settings: &LeagueSettings,
    progress: &Arc<dyn ProgressCallback>,
    report: &mut LeagueReport,
) {
    let links = match team_links(fetcher, team, &settings.season).await {
        Ok(links) => links,
        Err(e) => {
            log::warn!("Skipping {team}: {e}");
            report.failures.push(Failure {
                team,
                url: None,
                error: e.to_string(),
            });
            return;
        }
    };

    let urls: Vec<String> = links
        .into_iter()
        .take(settings.limit.unwrap_or(usize::MAX))
        .collect();
    progress.set_total(urls.len() as u64);

    let players = report.players.entry(team).or_default();
    for url in urls {
        settings.pacer.pause().await;
        progress.set_message(url.clone());

        match fetch_player(fetcher, &url, team).await {
            Ok(player) => players.push(player),
            Err(e) => {
                log::warn!("Skipping player: {e}");
                report.failures.push(Failure {
                    team,
                    url: Some(url),
                    error: e.to_string(),
                });
            }
        }
        progress.inc(1);
    }
}

//! Player record assembly.

use std::collections::BTreeMap;

use hoops_ref_player_models::{Player, SeasonStatistics, Team};
use scraper::Html;

use crate::ScrapeError;
use crate::biography::parse_biography;
use crate::season::parse_seasons;

/// Composes a [`Player`] from already-parsed parts.
#[must_use]
pub const fn assemble(
    name: String,
    team: Team,
    height_cm: u32,
    weight_kg: u32,
    seasons: BTreeMap<String, SeasonStatistics>,
) -> Player {
    Player::new(name, team, height_cm, weight_kg, seasons)
}

/// Parses a player detail page into a [`Player`] on `team`'s roster.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] raised by the season table or the
/// biography block. No partial record is produced.
pub fn parse_player(document: &Html, team: Team) -> Result<Player, ScrapeError> {
    let seasons = parse_seasons(document)?;
    let bio = parse_biography(document)?;

    log::debug!("Parsed {} ({team}) with {} seasons", bio.name, seasons.len());

    Ok(assemble(
        bio.name,
        team,
        bio.height_cm,
        bio.weight_kg,
        seasons,
    ))
}

//! Player link discovery on team roster pages.

use std::collections::BTreeSet;

use hoops_ref_player_models::Team;
use scraper::Html;

use crate::urls::{PLAYER_PATH_PREFIX, absolute};
use crate::{ScrapeError, parse_selector};

/// Selector for the roster table on a team season page.
const ROSTER_TABLE: &str = "table#roster";

/// Collects the player detail pages linked from `team`'s roster table.
///
/// Players listed more than once (mid-season moves, two-way contracts)
/// appear once in the result. A roster table with no player links yields an
/// empty set.
///
/// # Errors
///
/// Returns [`ScrapeError::StructuralNotFound`] if the page has no roster
/// table.
pub fn extract_roster_links(document: &Html, team: Team) -> Result<BTreeSet<String>, ScrapeError> {
    let table_sel = parse_selector(ROSTER_TABLE)?;
    let link_sel = parse_selector("a[href]")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::StructuralNotFound {
            element: ROSTER_TABLE.to_owned(),
            context: format!("roster page for {team}"),
        })?;

    let links: BTreeSet<String> = table
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with(PLAYER_PATH_PREFIX))
        .map(absolute)
        .collect();

    if links.is_empty() {
        log::warn!("Roster table for {team} has no player links");
    } else {
        log::debug!("Found {} player links for {team}", links.len());
    }

    Ok(links)
}

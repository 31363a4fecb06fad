#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fetching and orchestration glue around `hoops_ref_scraper`.
//!
//! The scraper crate only parses documents; this crate owns everything that
//! touches the network: browser-like request headers, the session cookie,
//! randomized pacing between requests, and the loop over a league's teams.

pub mod fetch;
pub mod pipeline;

use hoops_ref_player_models::Team;

/// Parses a comma-separated list of franchise codes (e.g. `"BOS,nyk"`).
///
/// # Errors
///
/// Returns a message naming the first code that is not a current
/// franchise.
pub fn parse_teams(list: &str) -> Result<Vec<Team>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            code.to_ascii_uppercase()
                .parse::<Team>()
                .map_err(|_| format!("Unknown team code: {code}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_team_list() {
        assert_eq!(
            parse_teams("BOS, nyk,,GSW").unwrap(),
            [Team::BostonCeltics, Team::NewYorkKnicks, Team::GoldenStateWarriors]
        );
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(parse_teams("BOS,SEA").unwrap_err(), "Unknown team code: SEA");
    }
}

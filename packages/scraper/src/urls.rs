//! Site URL construction.

use hoops_ref_player_models::Team;

/// Origin every page path is resolved against.
pub const BASE_URL: &str = "https://www.basketball-reference.com";

/// Path prefix shared by all player detail pages.
pub const PLAYER_PATH_PREFIX: &str = "/players/";

/// Season used when the caller does not pick one.
pub const DEFAULT_SEASON: &str = "2025";

/// URL of a team's roster page for the season ending in `season`.
#[must_use]
pub fn roster_url(team: Team, season: &str) -> String {
    format!("{BASE_URL}/teams/{}/{season}.html", team.code())
}

/// Resolves a site-relative path to a full URL.
#[must_use]
pub fn absolute(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

/// Whether `url` points at a player detail page on this site.
#[must_use]
pub fn is_player_url(url: &str) -> bool {
    url.strip_prefix(BASE_URL)
        .is_some_and(|path| path.starts_with(PLAYER_PATH_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_roster_url() {
        assert_eq!(
            roster_url(Team::CharlotteHornets, "2025"),
            "https://www.basketball-reference.com/teams/CHO/2025.html"
        );
    }

    #[test]
    fn recognizes_player_urls() {
        assert!(is_player_url(&absolute("/players/t/tatumja01.html")));
        assert!(!is_player_url(&absolute("/teams/BOS/2025.html")));
        assert!(!is_player_url("https://example.com/players/t/tatumja01.html"));
    }
}

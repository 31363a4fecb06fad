#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Franchise codes, season statistics, and player record types.
//!
//! These are the typed records produced by the extraction pipeline in
//! `hoops_ref_scraper`. Every franchise reference goes through [`Team`] so
//! call sites can match exhaustively over the league instead of comparing
//! free-form strings.

pub mod season;

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use season::{FieldValue, SeasonField, SeasonStatistics};

/// A current league franchise, keyed by the three-letter code the site uses
/// in its URLs and table cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Team {
    #[serde(rename = "ATL")]
    #[strum(serialize = "ATL")]
    AtlantaHawks,
    #[serde(rename = "BOS")]
    #[strum(serialize = "BOS")]
    BostonCeltics,
    #[serde(rename = "BRK")]
    #[strum(serialize = "BRK")]
    BrooklynNets,
    #[serde(rename = "CHI")]
    #[strum(serialize = "CHI")]
    ChicagoBulls,
    #[serde(rename = "CHO")]
    #[strum(serialize = "CHO")]
    CharlotteHornets,
    #[serde(rename = "CLE")]
    #[strum(serialize = "CLE")]
    ClevelandCavaliers,
    #[serde(rename = "DAL")]
    #[strum(serialize = "DAL")]
    DallasMavericks,
    #[serde(rename = "DEN")]
    #[strum(serialize = "DEN")]
    DenverNuggets,
    #[serde(rename = "DET")]
    #[strum(serialize = "DET")]
    DetroitPistons,
    #[serde(rename = "GSW")]
    #[strum(serialize = "GSW")]
    GoldenStateWarriors,
    #[serde(rename = "HOU")]
    #[strum(serialize = "HOU")]
    HoustonRockets,
    #[serde(rename = "IND")]
    #[strum(serialize = "IND")]
    IndianaPacers,
    #[serde(rename = "LAC")]
    #[strum(serialize = "LAC")]
    LosAngelesClippers,
    #[serde(rename = "LAL")]
    #[strum(serialize = "LAL")]
    LosAngelesLakers,
    #[serde(rename = "MEM")]
    #[strum(serialize = "MEM")]
    MemphisGrizzlies,
    #[serde(rename = "MIA")]
    #[strum(serialize = "MIA")]
    MiamiHeat,
    #[serde(rename = "MIL")]
    #[strum(serialize = "MIL")]
    MilwaukeeBucks,
    #[serde(rename = "MIN")]
    #[strum(serialize = "MIN")]
    MinnesotaTimberwolves,
    #[serde(rename = "NOP")]
    #[strum(serialize = "NOP")]
    NewOrleansPelicans,
    #[serde(rename = "NYK")]
    #[strum(serialize = "NYK")]
    NewYorkKnicks,
    #[serde(rename = "OKC")]
    #[strum(serialize = "OKC")]
    OklahomaCityThunder,
    #[serde(rename = "ORL")]
    #[strum(serialize = "ORL")]
    OrlandoMagic,
    #[serde(rename = "PHI")]
    #[strum(serialize = "PHI")]
    Philadelphia76ers,
    #[serde(rename = "PHO")]
    #[strum(serialize = "PHO")]
    PhoenixSuns,
    #[serde(rename = "POR")]
    #[strum(serialize = "POR")]
    PortlandTrailBlazers,
    #[serde(rename = "SAC")]
    #[strum(serialize = "SAC")]
    SacramentoKings,
    #[serde(rename = "SAS")]
    #[strum(serialize = "SAS")]
    SanAntonioSpurs,
    #[serde(rename = "TOR")]
    #[strum(serialize = "TOR")]
    TorontoRaptors,
    #[serde(rename = "UTA")]
    #[strum(serialize = "UTA")]
    UtahJazz,
    #[serde(rename = "WAS")]
    #[strum(serialize = "WAS")]
    WashingtonWizards,
}

impl Team {
    /// Returns the three-letter site code (e.g. `"BOS"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AtlantaHawks => "ATL",
            Self::BostonCeltics => "BOS",
            Self::BrooklynNets => "BRK",
            Self::ChicagoBulls => "CHI",
            Self::CharlotteHornets => "CHO",
            Self::ClevelandCavaliers => "CLE",
            Self::DallasMavericks => "DAL",
            Self::DenverNuggets => "DEN",
            Self::DetroitPistons => "DET",
            Self::GoldenStateWarriors => "GSW",
            Self::HoustonRockets => "HOU",
            Self::IndianaPacers => "IND",
            Self::LosAngelesClippers => "LAC",
            Self::LosAngelesLakers => "LAL",
            Self::MemphisGrizzlies => "MEM",
            Self::MiamiHeat => "MIA",
            Self::MilwaukeeBucks => "MIL",
            Self::MinnesotaTimberwolves => "MIN",
            Self::NewOrleansPelicans => "NOP",
            Self::NewYorkKnicks => "NYK",
            Self::OklahomaCityThunder => "OKC",
            Self::OrlandoMagic => "ORL",
            Self::Philadelphia76ers => "PHI",
            Self::PhoenixSuns => "PHO",
            Self::PortlandTrailBlazers => "POR",
            Self::SacramentoKings => "SAC",
            Self::SanAntonioSpurs => "SAS",
            Self::TorontoRaptors => "TOR",
            Self::UtahJazz => "UTA",
            Self::WashingtonWizards => "WAS",
        }
    }

    /// Returns the franchise's display name.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::AtlantaHawks => "Atlanta Hawks",
            Self::BostonCeltics => "Boston Celtics",
            Self::BrooklynNets => "Brooklyn Nets",
            Self::ChicagoBulls => "Chicago Bulls",
            Self::CharlotteHornets => "Charlotte Hornets",
            Self::ClevelandCavaliers => "Cleveland Cavaliers",
            Self::DallasMavericks => "Dallas Mavericks",
            Self::DenverNuggets => "Denver Nuggets",
            Self::DetroitPistons => "Detroit Pistons",
            Self::GoldenStateWarriors => "Golden State Warriors",
            Self::HoustonRockets => "Houston Rockets",
            Self::IndianaPacers => "Indiana Pacers",
            Self::LosAngelesClippers => "Los Angeles Clippers",
            Self::LosAngelesLakers => "Los Angeles Lakers",
            Self::MemphisGrizzlies => "Memphis Grizzlies",
            Self::MiamiHeat => "Miami Heat",
            Self::MilwaukeeBucks => "Milwaukee Bucks",
            Self::MinnesotaTimberwolves => "Minnesota Timberwolves",
            Self::NewOrleansPelicans => "New Orleans Pelicans",
            Self::NewYorkKnicks => "New York Knicks",
            Self::OklahomaCityThunder => "Oklahoma City Thunder",
            Self::OrlandoMagic => "Orlando Magic",
            Self::Philadelphia76ers => "Philadelphia 76ers",
            Self::PhoenixSuns => "Phoenix Suns",
            Self::PortlandTrailBlazers => "Portland Trail Blazers",
            Self::SacramentoKings => "Sacramento Kings",
            Self::SanAntonioSpurs => "San Antonio Spurs",
            Self::TorontoRaptors => "Toronto Raptors",
            Self::UtahJazz => "Utah Jazz",
            Self::WashingtonWizards => "Washington Wizards",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AtlantaHawks,
            Self::BostonCeltics,
            Self::BrooklynNets,
            Self::ChicagoBulls,
            Self::CharlotteHornets,
            Self::ClevelandCavaliers,
            Self::DallasMavericks,
            Self::DenverNuggets,
            Self::DetroitPistons,
            Self::GoldenStateWarriors,
            Self::HoustonRockets,
            Self::IndianaPacers,
            Self::LosAngelesClippers,
            Self::LosAngelesLakers,
            Self::MemphisGrizzlies,
            Self::MiamiHeat,
            Self::MilwaukeeBucks,
            Self::MinnesotaTimberwolves,
            Self::NewOrleansPelicans,
            Self::NewYorkKnicks,
            Self::OklahomaCityThunder,
            Self::OrlandoMagic,
            Self::Philadelphia76ers,
            Self::PhoenixSuns,
            Self::PortlandTrailBlazers,
            Self::SacramentoKings,
            Self::SanAntonioSpurs,
            Self::TorontoRaptors,
            Self::UtahJazz,
            Self::WashingtonWizards,
        ]
    }
}

/// Listed playing position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Position {
    #[serde(rename = "C")]
    #[strum(serialize = "C")]
    Center,
    #[serde(rename = "PF")]
    #[strum(serialize = "PF")]
    PowerForward,
    #[serde(rename = "SF")]
    #[strum(serialize = "SF")]
    SmallForward,
    #[serde(rename = "SG")]
    #[strum(serialize = "SG")]
    ShootingGuard,
    #[serde(rename = "PG")]
    #[strum(serialize = "PG")]
    PointGuard,
}

/// The team cell of a season row.
///
/// Career tables reach back past the current league layout, and traded
/// players get aggregate rows (`2TM`, `3TM`), so not every code is a
/// current [`Team`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeasonTeam {
    /// A current franchise.
    Franchise(Team),
    /// A defunct franchise or multi-team aggregate code, kept verbatim.
    Other(String),
}

impl SeasonTeam {
    /// Returns the franchise if this row belongs to a current team.
    #[must_use]
    pub const fn franchise(&self) -> Option<Team> {
        match self {
            Self::Franchise(team) => Some(*team),
            Self::Other(_) => None,
        }
    }

    /// Returns the raw code as it appeared in the table.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Franchise(team) => team.code(),
            Self::Other(code) => code,
        }
    }
}

impl FromStr for SeasonTeam {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Team>()
            .map_or_else(|_| Self::Other(s.to_owned()), Self::Franchise))
    }
}

impl From<String> for SeasonTeam {
    fn from(value: String) -> Self {
        match value.parse::<Team>() {
            Ok(team) => Self::Franchise(team),
            Err(_) => Self::Other(value),
        }
    }
}

impl From<SeasonTeam> for String {
    fn from(value: SeasonTeam) -> Self {
        match value {
            SeasonTeam::Franchise(team) => team.code().to_owned(),
            SeasonTeam::Other(code) => code,
        }
    }
}

impl std::fmt::Display for SeasonTeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A player's biography plus their career per-game table, keyed by
/// season-ending year (`"2025"` for 2024-25).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Display name from the page heading.
    pub name: String,
    /// The roster the player was discovered on.
    pub team: Team,
    /// Height in centimeters.
    pub height_cm: u32,
    /// Weight in kilograms.
    pub weight_kg: u32,
    /// One record per season played.
    pub seasons: BTreeMap<String, SeasonStatistics>,
}

impl Player {
    /// Composes a player record from already-validated parts.
    #[must_use]
    pub const fn new(
        name: String,
        team: Team,
        height_cm: u32,
        weight_kg: u32,
        seasons: BTreeMap<String, SeasonStatistics>,
    ) -> Self {
        Self {
            name,
            team,
            height_cm,
            weight_kg,
            seasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_franchises() {
        assert_eq!(Team::all().len(), 30);
    }

    #[test]
    fn team_code_roundtrip() {
        for team in Team::all() {
            assert_eq!(team.code(), team.as_ref());
            assert_eq!(team.to_string(), team.code());
            assert_eq!(team.code().parse::<Team>().unwrap(), *team);
        }
    }

    #[test]
    fn team_serializes_as_code() {
        let json = serde_json::to_string(&Team::Philadelphia76ers).unwrap();
        assert_eq!(json, "\"PHI\"");
        let team: Team = serde_json::from_str("\"NOP\"").unwrap();
        assert_eq!(team, Team::NewOrleansPelicans);
    }

    #[test]
    fn rejects_unknown_team_code() {
        assert!("SEA".parse::<Team>().is_err());
    }

    #[test]
    fn season_team_keeps_non_franchise_codes() {
        let current: SeasonTeam = "MIA".parse().unwrap();
        assert_eq!(current.franchise(), Some(Team::MiamiHeat));

        let aggregate: SeasonTeam = "2TM".parse().unwrap();
        assert_eq!(aggregate, SeasonTeam::Other("2TM".to_string()));
        assert_eq!(aggregate.franchise(), None);
        assert_eq!(aggregate.code(), "2TM");

        let json = serde_json::to_string(&aggregate).unwrap();
        assert_eq!(json, "\"2TM\"");
    }

    #[test]
    fn position_codes() {
        assert_eq!("PF".parse::<Position>().unwrap(), Position::PowerForward);
        assert_eq!(Position::PointGuard.to_string(), "PG");
        assert!("G-F".parse::<Position>().is_err());
    }
}

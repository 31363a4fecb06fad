//! Per-season statistics and the typed cell values they are built from.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{Position, SeasonTeam};

/// A semantic attribute of a [`SeasonStatistics`] record that a table
/// column can map to.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SeasonField {
    // ── Identity and counts ─────────────────────────────
    Age,
    Team,
    League,
    Position,
    GamesPlayed,
    GamesStarted,

    // ── Per-game volume ─────────────────────────────────
    MinutesPerGame,
    FieldGoalsPerGame,
    FieldGoalAttemptsPerGame,
    ThreePointFieldGoalsPerGame,
    ThreePointFieldGoalAttemptsPerGame,
    TwoPointFieldGoalsPerGame,
    TwoPointFieldGoalAttemptsPerGame,
    FreeThrowsPerGame,
    FreeThrowAttemptsPerGame,

    // ── Shooting percentages ────────────────────────────
    FieldGoalPercentage,
    ThreePointPercentage,
    TwoPointPercentage,
    EffectiveFieldGoalPercentage,
    FreeThrowPercentage,

    // ── Per-game box score ──────────────────────────────
    OffensiveReboundsPerGame,
    DefensiveReboundsPerGame,
    TotalReboundsPerGame,
    AssistsPerGame,
    StealsPerGame,
    BlocksPerGame,
    TurnoversPerGame,
    PersonalFoulsPerGame,
    PointsPerGame,
}

impl SeasonField {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Age,
            Self::Team,
            Self::League,
            Self::Position,
            Self::GamesPlayed,
            Self::GamesStarted,
            Self::MinutesPerGame,
            Self::FieldGoalsPerGame,
            Self::FieldGoalAttemptsPerGame,
            Self::ThreePointFieldGoalsPerGame,
            Self::ThreePointFieldGoalAttemptsPerGame,
            Self::TwoPointFieldGoalsPerGame,
            Self::TwoPointFieldGoalAttemptsPerGame,
            Self::FreeThrowsPerGame,
            Self::FreeThrowAttemptsPerGame,
            Self::FieldGoalPercentage,
            Self::ThreePointPercentage,
            Self::TwoPointPercentage,
            Self::EffectiveFieldGoalPercentage,
            Self::FreeThrowPercentage,
            Self::OffensiveReboundsPerGame,
            Self::DefensiveReboundsPerGame,
            Self::TotalReboundsPerGame,
            Self::AssistsPerGame,
            Self::StealsPerGame,
            Self::BlocksPerGame,
            Self::TurnoversPerGame,
            Self::PersonalFoulsPerGame,
            Self::PointsPerGame,
        ]
    }
}

/// A table cell after type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A run of digits, such as games played.
    Int(i64),
    /// A decimal or leading-dot ratio.
    Float(f64),
    /// Anything else, including blank cells.
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value. Integers widen to `f64`; text is `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) => None,
        }
    }

    /// The value as it would have been written in the table.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One season of per-game statistics for one player.
///
/// Percentages are `None` when the player attempted no shots of that kind
/// and the site left the cell blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatistics {
    /// Season-ending year (`"2025"` for 2024-25).
    pub year: String,
    /// Age on February 1 of the season.
    pub age: u32,
    /// Team the row was played for, or an aggregate code like `2TM`.
    pub team: SeasonTeam,
    /// Competition code, `"NBA"` for regular league seasons.
    pub league: String,
    /// Primary position listed for the season.
    pub position: Position,
    /// Games appeared in.
    pub games_played: u32,
    /// Games started.
    pub games_started: u32,

    /// Minutes played per game.
    pub minutes_per_game: f64,
    /// Field goals made per game.
    pub field_goals_per_game: f64,
    /// Field goals attempted per game.
    pub field_goal_attempts_per_game: f64,
    /// Three-pointers made per game.
    pub three_point_field_goals_per_game: f64,
    /// Three-pointers attempted per game.
    pub three_point_field_goal_attempts_per_game: f64,
    /// Two-pointers made per game.
    pub two_point_field_goals_per_game: f64,
    /// Two-pointers attempted per game.
    pub two_point_field_goal_attempts_per_game: f64,
    /// Free throws made per game.
    pub free_throws_per_game: f64,
    /// Free throws attempted per game.
    pub free_throw_attempts_per_game: f64,

    /// Field goals made over attempted.
    pub field_goal_percentage: Option<f64>,
    /// Three-pointers made over attempted.
    pub three_point_percentage: Option<f64>,
    /// Two-pointers made over attempted.
    pub two_point_percentage: Option<f64>,
    /// Field goal percentage weighting threes at 1.5 makes.
    pub effective_field_goal_percentage: Option<f64>,
    /// Free throws made over attempted.
    pub free_throw_percentage: Option<f64>,

    /// Offensive rebounds per game.
    pub offensive_rebounds_per_game: f64,
    /// Defensive rebounds per game.
    pub defensive_rebounds_per_game: f64,
    /// Total rebounds per game.
    pub total_rebounds_per_game: f64,
    /// Assists per game.
    pub assists_per_game: f64,
    /// Steals per game.
    pub steals_per_game: f64,
    /// Blocks per game.
    pub blocks_per_game: f64,
    /// Turnovers per game.
    pub turnovers_per_game: f64,
    /// Personal fouls per game.
    pub personal_fouls_per_game: f64,
    /// Points per game.
    pub points_per_game: f64,
}

//! Per-game statistics table parsing.
//!
//! Each body row of `table#per_game_stats` is one player-season (a traded
//! player gets several rows for the same year). Cells are typed through
//! [`normalize`](crate::normalize::normalize) and the row's year comes
//! from the `csk` sort key on its header cell rather than the displayed
//! `2024-25` text.

use std::collections::BTreeMap;

use hoops_ref_player_models::{FieldValue, Position, SeasonField, SeasonStatistics};
use scraper::Html;

use crate::normalize::normalize;
use crate::{ScrapeError, parse_selector};

/// Selector for the per-game table on a player page.
const PER_GAME_TABLE: &str = "table#per_game_stats";

/// Sort-key attribute carrying the canonical season year.
const SORT_KEY: &str = "csk";

/// Typed cells accumulated for one row.
type RowFields = BTreeMap<SeasonField, FieldValue>;

/// Parses the per-game table into one record per season year.
///
/// Rows are processed in document order and a later row for an already
/// seen year replaces the earlier record.
///
/// # Errors
///
/// * [`ScrapeError::StructuralNotFound`] if the page has no per-game table.
/// * [`ScrapeError::MissingRequiredField`] if a data row has no year sort
///   key or lacks one of the record's columns.
/// * [`ScrapeError::MalformedValue`] if a mapped cell has the wrong type
///   or is out of range.
pub fn parse_seasons(document: &Html) -> Result<BTreeMap<String, SeasonStatistics>, ScrapeError> {
    let table_sel = parse_selector(PER_GAME_TABLE)?;
    let row_sel = parse_selector("tbody > tr")?;
    let th_sel = parse_selector("th")?;
    let td_sel = parse_selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::StructuralNotFound {
            element: PER_GAME_TABLE.to_owned(),
            context: "player page".to_owned(),
        })?;

    let mut seasons = BTreeMap::new();

    for (index, row) in table.select(&row_sel).enumerate() {
        let cells: Vec<_> = row.select(&td_sel).collect();

        // Repeated header and spacer rows carry no data cells.
        if cells.is_empty() {
            continue;
        }

        let year = row
            .select(&th_sel)
            .next()
            .and_then(|th| th.value().attr(SORT_KEY))
            .map(str::trim)
            .filter(|year| !year.is_empty())
            .ok_or_else(|| ScrapeError::MissingRequiredField {
                field: "year".to_owned(),
                context: format!("per-game row {index}"),
            })?;

        let context = format!("per-game row {index}, season {year}");
        let mut fields = RowFields::new();

        for cell in cells {
            let Some(data_stat) = cell.value().attr("data-stat") else {
                continue;
            };
            let text: String = cell.text().collect();

            match normalize(data_stat, &text).map_err(|e| e.with_context(&context))? {
                Some((field, value)) => {
                    fields.insert(field, value);
                }
                None => log::debug!("Skipping unmapped column '{data_stat}' ({context})"),
            }
        }

        let record = build_season(year, &fields, &context)?;

        if seasons.insert(year.to_owned(), record).is_some() {
            log::debug!("Season {year} appears again at row {index}; keeping the later row");
        }
    }

    Ok(seasons)
}

/// Builds a record from one row's typed cells. Every attribute is required.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingRequiredField`] or
/// [`ScrapeError::MalformedValue`] naming the offending attribute.
pub fn build_season(
    year: &str,
    fields: &BTreeMap<SeasonField, FieldValue>,
    context: &str,
) -> Result<SeasonStatistics, ScrapeError> {
    let row = Row { fields, context };

    Ok(SeasonStatistics {
        year: year.to_owned(),
        age: row.count(SeasonField::Age)?,
        team: row.text(SeasonField::Team)?.into(),
        league: row.text(SeasonField::League)?,
        position: row.position()?,
        games_played: row.count(SeasonField::GamesPlayed)?,
        games_started: row.count(SeasonField::GamesStarted)?,

        minutes_per_game: row.rate(SeasonField::MinutesPerGame)?,
        field_goals_per_game: row.rate(SeasonField::FieldGoalsPerGame)?,
        field_goal_attempts_per_game: row.rate(SeasonField::FieldGoalAttemptsPerGame)?,
        three_point_field_goals_per_game: row.rate(SeasonField::ThreePointFieldGoalsPerGame)?,
        three_point_field_goal_attempts_per_game: row
            .rate(SeasonField::ThreePointFieldGoalAttemptsPerGame)?,
        two_point_field_goals_per_game: row.rate(SeasonField::TwoPointFieldGoalsPerGame)?,
        two_point_field_goal_attempts_per_game: row
            .rate(SeasonField::TwoPointFieldGoalAttemptsPerGame)?,
        free_throws_per_game: row.rate(SeasonField::FreeThrowsPerGame)?,
        free_throw_attempts_per_game: row.rate(SeasonField::FreeThrowAttemptsPerGame)?,

        field_goal_percentage: row.percentage(SeasonField::FieldGoalPercentage)?,
        three_point_percentage: row.percentage(SeasonField::ThreePointPercentage)?,
        two_point_percentage: row.percentage(SeasonField::TwoPointPercentage)?,
        effective_field_goal_percentage: row
            .percentage(SeasonField::EffectiveFieldGoalPercentage)?,
        free_throw_percentage: row.percentage(SeasonField::FreeThrowPercentage)?,

        offensive_rebounds_per_game: row.rate(SeasonField::OffensiveReboundsPerGame)?,
        defensive_rebounds_per_game: row.rate(SeasonField::DefensiveReboundsPerGame)?,
        total_rebounds_per_game: row.rate(SeasonField::TotalReboundsPerGame)?,
        assists_per_game: row.rate(SeasonField::AssistsPerGame)?,
        steals_per_game: row.rate(SeasonField::StealsPerGame)?,
        blocks_per_game: row.rate(SeasonField::BlocksPerGame)?,
        turnovers_per_game: row.rate(SeasonField::TurnoversPerGame)?,
        personal_fouls_per_game: row.rate(SeasonField::PersonalFoulsPerGame)?,
        points_per_game: row.rate(SeasonField::PointsPerGame)?,
    })
}

/// Typed accessors over one row's cells.
struct Row<'a> {
    fields: &'a RowFields,
    context: &'a str,
}

impl Row<'_> {
    fn get(&self, field: SeasonField) -> Result<&FieldValue, ScrapeError> {
        self.fields
            .get(&field)
            .ok_or_else(|| ScrapeError::MissingRequiredField {
                field: field.to_string(),
                context: self.context.to_owned(),
            })
    }

    fn malformed(&self, field: SeasonField, value: &FieldValue) -> ScrapeError {
        ScrapeError::MalformedValue {
            field: field.to_string(),
            value: value.as_text(),
            context: self.context.to_owned(),
        }
    }

    /// Non-negative integer.
    fn count(&self, field: SeasonField) -> Result<u32, ScrapeError> {
        let value = self.get(field)?;
        match value {
            FieldValue::Int(i) => u32::try_from(*i).map_err(|_| self.malformed(field, value)),
            _ => Err(self.malformed(field, value)),
        }
    }

    /// Non-negative per-game rate. Whole numbers are rendered without a
    /// decimal point and arrive as integers.
    fn rate(&self, field: SeasonField) -> Result<f64, ScrapeError> {
        let value = self.get(field)?;
        value
            .as_f64()
            .filter(|rate| rate.is_finite() && *rate >= 0.0)
            .ok_or_else(|| self.malformed(field, value))
    }

    /// Ratio in `[0, 1]`, or `None` for a blank cell (no attempts).
    fn percentage(&self, field: SeasonField) -> Result<Option<f64>, ScrapeError> {
        let value = self.get(field)?;
        if matches!(value, FieldValue::Text(text) if text.is_empty()) {
            return Ok(None);
        }
        value
            .as_f64()
            .filter(|ratio| (0.0..=1.0).contains(ratio))
            .map(Some)
            .ok_or_else(|| self.malformed(field, value))
    }

    /// Non-empty text such as a team or league code.
    fn text(&self, field: SeasonField) -> Result<String, ScrapeError> {
        match self.get(field)? {
            FieldValue::Text(text) if !text.is_empty() => Ok(text.clone()),
            FieldValue::Text(_) => Err(ScrapeError::MissingRequiredField {
                field: field.to_string(),
                context: self.context.to_owned(),
            }),
            other => Err(self.malformed(field, other)),
        }
    }

    fn position(&self) -> Result<Position, ScrapeError> {
        let value = self.get(SeasonField::Position)?;
        match value {
            FieldValue::Text(text) => text
                .parse::<Position>()
                .map_err(|_| self.malformed(SeasonField::Position, value)),
            _ => Err(self.malformed(SeasonField::Position, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use hoops_ref_player_models::{SeasonTeam, Team};

    use super::*;
    use crate::normalize::column_mapping;

    fn sample(year: &str, team: &str, points: f64) -> SeasonStatistics {
        SeasonStatistics {
            year: year.to_string(),
            age: 26,
            team: team.to_string().into(),
            league: "NBA".to_string(),
            position: Position::PowerForward,
            games_played: 74,
            games_started: 74,
            minutes_per_game: 35.8,
            field_goals_per_game: 9.1,
            field_goal_attempts_per_game: 20.3,
            three_point_field_goals_per_game: 3.1,
            three_point_field_goal_attempts_per_game: 8.2,
            two_point_field_goals_per_game: 6.0,
            two_point_field_goal_attempts_per_game: 12.1,
            free_throws_per_game: 5.8,
            free_throw_attempts_per_game: 6.8,
            field_goal_percentage: Some(0.452),
            three_point_percentage: Some(0.376),
            two_point_percentage: Some(0.5),
            effective_field_goal_percentage: Some(0.53),
            free_throw_percentage: Some(0.847),
            offensive_rebounds_per_game: 0.9,
            defensive_rebounds_per_game: 7.8,
            total_rebounds_per_game: 8.7,
            assists_per_game: 6.0,
            steals_per_game: 1.1,
            blocks_per_game: 0.5,
            turnovers_per_game: 2.9,
            personal_fouls_per_game: 2.3,
            points_per_game: points,
        }
    }

    /// Renders a value the way the site does: ratios as `.847`, whole
    /// counts as plain digits.
    fn cell_text(field: SeasonField, stats: &SeasonStatistics) -> String {
        let pct = |value: Option<f64>| {
            value.map_or_else(String::new, |v| {
                format!("{v:.3}").trim_start_matches('0').to_string()
            })
        };
        match field {
            SeasonField::Age => stats.age.to_string(),
            SeasonField::Team => stats.team.to_string(),
            SeasonField::League => stats.league.clone(),
            SeasonField::Position => stats.position.to_string(),
            SeasonField::GamesPlayed => stats.games_played.to_string(),
            SeasonField::GamesStarted => stats.games_started.to_string(),
            SeasonField::MinutesPerGame => format!("{:.1}", stats.minutes_per_game),
            SeasonField::FieldGoalsPerGame => format!("{:.1}", stats.field_goals_per_game),
            SeasonField::FieldGoalAttemptsPerGame => {
                format!("{:.1}", stats.field_goal_attempts_per_game)
            }
            SeasonField::ThreePointFieldGoalsPerGame => {
                format!("{:.1}", stats.three_point_field_goals_per_game)
            }
            SeasonField::ThreePointFieldGoalAttemptsPerGame => {
                format!("{:.1}", stats.three_point_field_goal_attempts_per_game)
            }
            SeasonField::TwoPointFieldGoalsPerGame => {
                format!("{:.1}", stats.two_point_field_goals_per_game)
            }
            SeasonField::TwoPointFieldGoalAttemptsPerGame => {
                format!("{:.1}", stats.two_point_field_goal_attempts_per_game)
            }
            SeasonField::FreeThrowsPerGame => format!("{:.1}", stats.free_throws_per_game),
            SeasonField::FreeThrowAttemptsPerGame => {
                format!("{:.1}", stats.free_throw_attempts_per_game)
            }
            SeasonField::FieldGoalPercentage => pct(stats.field_goal_percentage),
            SeasonField::ThreePointPercentage => pct(stats.three_point_percentage),
            SeasonField::TwoPointPercentage => pct(stats.two_point_percentage),
            SeasonField::EffectiveFieldGoalPercentage => {
                pct(stats.effective_field_goal_percentage)
            }
            SeasonField::FreeThrowPercentage => pct(stats.free_throw_percentage),
            SeasonField::OffensiveReboundsPerGame => {
                format!("{:.1}", stats.offensive_rebounds_per_game)
            }
            SeasonField::DefensiveReboundsPerGame => {
                format!("{:.1}", stats.defensive_rebounds_per_game)
            }
            SeasonField::TotalReboundsPerGame => format!("{:.1}", stats.total_rebounds_per_game),
            SeasonField::AssistsPerGame => format!("{:.1}", stats.assists_per_game),
            SeasonField::StealsPerGame => format!("{:.1}", stats.steals_per_game),
            SeasonField::BlocksPerGame => format!("{:.1}", stats.blocks_per_game),
            SeasonField::TurnoversPerGame => format!("{:.1}", stats.turnovers_per_game),
            SeasonField::PersonalFoulsPerGame => format!("{:.1}", stats.personal_fouls_per_game),
            SeasonField::PointsPerGame => format!("{:.1}", stats.points_per_game),
        }
    }

    fn row_html(stats: &SeasonStatistics, skip: Option<SeasonField>) -> String {
        let cells: String = column_mapping()
            .filter(|(_, field)| Some(*field) != skip)
            .map(|(code, field)| {
                format!(r#"<td data-stat="{code}">{}</td>"#, cell_text(field, stats))
            })
            .collect();
        format!(
            r#"<tr><th data-stat="year_id" csk="{}">{}-xx</th>{cells}<td data-stat="awards">AS</td></tr>"#,
            stats.year, stats.year
        )
    }

    fn table_page(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table id="per_game_stats">
            <thead><tr><th data-stat="year_id">Season</th></tr></thead>
            <tbody>{rows}</tbody>
            <tfoot><tr><th data-stat="year_id">Career</th><td data-stat="games">500</td></tr></tfoot>
            </table></body></html>"#
        ))
    }

    #[test]
    fn row_round_trips_into_record() {
        let expected = sample("2025", "BOS", 26.9);
        let doc = table_page(&row_html(&expected, None));

        let seasons = parse_seasons(&doc).unwrap();

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons["2025"], expected);
        assert_eq!(seasons["2025"].team.franchise(), Some(Team::BostonCeltics));
    }

    #[test]
    fn keys_by_sort_key_year() {
        let rows = format!(
            "{}{}",
            row_html(&sample("2024", "BOS", 26.9), None),
            row_html(&sample("2025", "BOS", 27.4), None)
        );
        let seasons = parse_seasons(&table_page(&rows)).unwrap();

        assert_eq!(
            seasons.keys().map(String::as_str).collect::<Vec<_>>(),
            ["2024", "2025"]
        );
    }

    #[test]
    fn later_row_for_same_year_wins() {
        let rows = format!(
            "{}{}{}",
            row_html(&sample("2025", "2TM", 20.0), None),
            row_html(&sample("2025", "NYK", 18.5), None),
            row_html(&sample("2025", "TOR", 23.1), None)
        );
        let seasons = parse_seasons(&table_page(&rows)).unwrap();

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons["2025"], sample("2025", "TOR", 23.1));
    }

    #[test]
    fn blank_percentage_is_none() {
        let mut stats = sample("2025", "DEN", 12.0);
        stats.three_point_percentage = None;
        let seasons = parse_seasons(&table_page(&row_html(&stats, None))).unwrap();
        assert_eq!(seasons["2025"].three_point_percentage, None);
    }

    #[test]
    fn non_franchise_team_codes_are_kept() {
        let stats = sample("2012", "NJN", 15.0);
        let seasons = parse_seasons(&table_page(&row_html(&stats, None))).unwrap();
        assert_eq!(seasons["2012"].team, SeasonTeam::Other("NJN".to_string()));
    }

    #[test]
    fn header_and_spacer_rows_are_skipped() {
        let rows = format!(
            r#"{}<tr class="thead"><th data-stat="year_id">Season</th></tr>{}"#,
            row_html(&sample("2024", "BOS", 26.9), None),
            row_html(&sample("2025", "BOS", 27.4), None)
        );
        let seasons = parse_seasons(&table_page(&rows)).unwrap();
        assert_eq!(seasons.len(), 2);
    }

    #[test]
    fn missing_table_is_structural() {
        let doc = Html::parse_document(
            r#"<html><body><div id="meta"><h1>Someone</h1></div></body></html>"#,
        );
        let err = parse_seasons(&doc).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::StructuralNotFound { ref element, .. } if element == "table#per_game_stats"
        ));
    }

    #[test]
    fn row_without_sort_key_is_fatal() {
        let doc = table_page(r#"<tr><th>2024-25</th><td data-stat="games">82</td></tr>"#);
        let err = parse_seasons(&doc).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingRequiredField { ref field, .. } if field == "year"
        ));
    }

    #[test]
    fn missing_column_is_fatal() {
        let stats = sample("2025", "BOS", 26.9);
        let doc = table_page(&row_html(&stats, Some(SeasonField::StealsPerGame)));
        let err = parse_seasons(&doc).unwrap_err();
        match err {
            ScrapeError::MissingRequiredField { field, context } => {
                assert_eq!(field, "steals_per_game");
                assert!(context.contains("season 2025"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_type_is_malformed() {
        let mut fields: RowFields = BTreeMap::new();
        for (code, field) in column_mapping() {
            let (_, value) = normalize(code, &cell_text(field, &sample("2025", "BOS", 1.0)))
                .unwrap()
                .unwrap();
            fields.insert(field, value);
        }

        fields.insert(SeasonField::GamesPlayed, FieldValue::Float(81.5));
        assert!(matches!(
            build_season("2025", &fields, "test"),
            Err(ScrapeError::MalformedValue { ref field, .. }) if field == "games_played"
        ));

        fields.insert(SeasonField::GamesPlayed, FieldValue::Int(81));
        fields.insert(SeasonField::FieldGoalPercentage, FieldValue::Float(45.2));
        assert!(matches!(
            build_season("2025", &fields, "test"),
            Err(ScrapeError::MalformedValue { ref field, .. }) if field == "field_goal_percentage"
        ));

        fields.insert(SeasonField::FieldGoalPercentage, FieldValue::Float(0.452));
        fields.insert(SeasonField::Position, FieldValue::Text("G".to_string()));
        assert!(matches!(
            build_season("2025", &fields, "test"),
            Err(ScrapeError::MalformedValue { ref field, .. }) if field == "position"
        ));
    }

    #[test]
    fn malformed_cell_reports_row_and_season() {
        let row = row_html(&sample("2025", "BOS", 26.9), None).replace(
            r#"data-stat="fg_pct">.452<"#,
            r#"data-stat="fg_pct">.8x<"#,
        );

        let err = parse_seasons(&table_page(&row)).unwrap_err();

        match err {
            ScrapeError::MalformedValue {
                field,
                value,
                context,
            } => {
                assert_eq!(field, "field_goal_percentage");
                assert_eq!(value, ".8x");
                assert!(context.contains("per-game row 0, season 2025"), "{context}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_count_is_malformed() {
        let row = row_html(&sample("2025", "BOS", 26.9), None).replace(
            r#"data-stat="games">74<"#,
            r#"data-stat="games">-3<"#,
        );

        let err = parse_seasons(&table_page(&row)).unwrap_err();

        match err {
            ScrapeError::MalformedValue {
                field,
                value,
                context,
            } => {
                assert_eq!(field, "games_played");
                assert_eq!(value, "-3");
                assert!(context.contains("season 2025"), "{context}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

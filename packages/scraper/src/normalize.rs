//! Cell normalization for the per-game statistics table.
//!
//! Each `<td>` carries a short `data-stat` code and a rendered text value.
//! [`normalize`] maps the code to a [`SeasonField`] and infers a typed
//! [`FieldValue`] from the text. Unmapped codes are skipped, never fatal.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use hoops_ref_player_models::{FieldValue, SeasonField};

use crate::ScrapeError;

/// Maps `data-stat` column codes to the attribute they populate.
static FIELD_MAPPING: LazyLock<BTreeMap<&'static str, SeasonField>> = LazyLock::new(|| {
    BTreeMap::from([
        ("age", SeasonField::Age),
        ("pos", SeasonField::Position),
        ("team_name_abbr", SeasonField::Team),
        ("comp_name_abbr", SeasonField::League),
        ("games", SeasonField::GamesPlayed),
        ("games_started", SeasonField::GamesStarted),
        ("mp_per_g", SeasonField::MinutesPerGame),
        ("fg_per_g", SeasonField::FieldGoalsPerGame),
        ("fga_per_g", SeasonField::FieldGoalAttemptsPerGame),
        ("fg_pct", SeasonField::FieldGoalPercentage),
        ("fg3_per_g", SeasonField::ThreePointFieldGoalsPerGame),
        ("fg3a_per_g", SeasonField::ThreePointFieldGoalAttemptsPerGame),
        ("fg3_pct", SeasonField::ThreePointPercentage),
        ("fg2_per_g", SeasonField::TwoPointFieldGoalsPerGame),
        ("fg2a_per_g", SeasonField::TwoPointFieldGoalAttemptsPerGame),
        ("fg2_pct", SeasonField::TwoPointPercentage),
        ("efg_pct", SeasonField::EffectiveFieldGoalPercentage),
        ("ft_per_g", SeasonField::FreeThrowsPerGame),
        ("fta_per_g", SeasonField::FreeThrowAttemptsPerGame),
        ("ft_pct", SeasonField::FreeThrowPercentage),
        ("orb_per_g", SeasonField::OffensiveReboundsPerGame),
        ("drb_per_g", SeasonField::DefensiveReboundsPerGame),
        ("trb_per_g", SeasonField::TotalReboundsPerGame),
        ("ast_per_g", SeasonField::AssistsPerGame),
        ("stl_per_g", SeasonField::StealsPerGame),
        ("blk_per_g", SeasonField::BlocksPerGame),
        ("tov_per_g", SeasonField::TurnoversPerGame),
        ("pf_per_g", SeasonField::PersonalFoulsPerGame),
        ("pts_per_g", SeasonField::PointsPerGame),
    ])
});

/// Looks up the attribute a `data-stat` code maps to.
#[must_use]
pub fn field_for(data_stat: &str) -> Option<SeasonField> {
    FIELD_MAPPING.get(data_stat).copied()
}

/// Iterates the full `(data-stat, attribute)` mapping in code order.
pub fn column_mapping() -> impl Iterator<Item = (&'static str, SeasonField)> {
    FIELD_MAPPING.iter().map(|(code, field)| (*code, *field))
}

/// Maps a raw cell to its attribute and typed value.
///
/// Returns `Ok(None)` when `data_stat` has no mapping.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedValue`] when a mapped cell uses the
/// leading-dot fraction form (`.847`) with anything other than digits
/// after the dot, or when an all-digit value overflows.
pub fn normalize(
    data_stat: &str,
    raw_text: &str,
) -> Result<Option<(SeasonField, FieldValue)>, ScrapeError> {
    let Some(field) = field_for(data_stat) else {
        return Ok(None);
    };

    let value = infer_value(raw_text.trim()).ok_or_else(|| ScrapeError::MalformedValue {
        field: field.to_string(),
        value: raw_text.to_owned(),
        context: format!("column '{data_stat}'"),
    })?;

    Ok(Some((field, value)))
}

/// Applies the typing rules in priority order: leading-dot fraction,
/// all-digit integer, decimal float, opaque text. `None` means the text
/// claimed a numeric form it does not satisfy.
fn infer_value(text: &str) -> Option<FieldValue> {
    if let Some(digits) = text.strip_prefix('.') {
        if !is_all_digits(digits) {
            return None;
        }
        return format!("0.{digits}").parse::<f64>().ok().map(FieldValue::Float);
    }

    if is_all_digits(text) {
        return text.parse::<i64>().ok().map(FieldValue::Int);
    }

    if looks_decimal(text)
        && let Ok(value) = text.parse::<f64>()
    {
        return Some(FieldValue::Float(value));
    }

    Some(FieldValue::Text(text.to_owned()))
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Plain signed decimal notation only, so that `inf`, `NaN` and exponent
/// forms stay text.
fn looks_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    unsigned.bytes().any(|b| b.is_ascii_digit())
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().filter(|b| *b == b'.').count() <= 1
}

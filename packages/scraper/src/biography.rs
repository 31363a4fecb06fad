//! Player biography block parsing.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::{ScrapeError, element_text, parse_selector};

/// Selector for the biography container on a player page.
const META_BLOCK: &str = "div#meta";

/// First parenthesized group, e.g. `(203cm, 100 kg)`.
static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("valid regex"));

/// Name and metric measurements from a player page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biography {
    pub name: String,
    pub height_cm: u32,
    pub weight_kg: u32,
}

/// Reads the player's name, height and weight from the `div#meta` block.
///
/// The measurements live in the block's third paragraph, formatted as
/// `6-8, 220lb (203cm, 100 kg)`; only the metric values in parentheses are
/// used.
///
/// # Errors
///
/// * [`ScrapeError::StructuralNotFound`] if the block, its heading, or its
///   third paragraph is absent.
/// * [`ScrapeError::MissingRequiredField`] if the name is empty or the
///   paragraph has no parenthesized height/weight pair.
/// * [`ScrapeError::MalformedValue`] if either measurement is not an
///   integer.
pub fn parse_biography(document: &Html) -> Result<Biography, ScrapeError> {
    let meta_sel = parse_selector(META_BLOCK)?;
    let h1_sel = parse_selector("h1")?;
    let p_sel = parse_selector("p")?;

    let meta = document
        .select(&meta_sel)
        .next()
        .ok_or_else(|| ScrapeError::StructuralNotFound {
            element: META_BLOCK.to_owned(),
            context: "player page".to_owned(),
        })?;

    let heading = meta
        .select(&h1_sel)
        .next()
        .ok_or_else(|| ScrapeError::StructuralNotFound {
            element: "h1".to_owned(),
            context: "biography block".to_owned(),
        })?;
    let name = element_text(heading);
    if name.is_empty() {
        return Err(ScrapeError::MissingRequiredField {
            field: "name".to_owned(),
            context: "biography block".to_owned(),
        });
    }

    let measurements = meta
        .select(&p_sel)
        .nth(2)
        .ok_or_else(|| ScrapeError::StructuralNotFound {
            element: "third paragraph".to_owned(),
            context: format!("biography block for {name}"),
        })?;
    let context = format!("biography of {name}");
    let (height_cm, weight_kg) = parse_measurements(&element_text(measurements), &context)?;

    Ok(Biography {
        name,
        height_cm,
        weight_kg,
    })
}

/// Extracts `(height_cm, weight_kg)` from text like `6-8, 220lb (203cm, 100 kg)`.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingRequiredField`] if the parenthesized pair
/// is absent, or [`ScrapeError::MalformedValue`] if a value is not numeric.
pub fn parse_measurements(text: &str, context: &str) -> Result<(u32, u32), ScrapeError> {
    let missing = |field: &str| ScrapeError::MissingRequiredField {
        field: field.to_owned(),
        context: context.to_owned(),
    };

    let inner = PARENTHETICAL_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| missing("height_cm"))?;

    let mut segments = inner.split(',');
    let height = segments
        .next()
        .map(|s| s.trim().replace("cm", ""))
        .ok_or_else(|| missing("height_cm"))?;
    let weight = segments
        .next()
        .map(|s| s.trim().replace("kg", "").replace('\u{a0}', ""))
        .ok_or_else(|| missing("weight_kg"))?;

    let parse = |field: &str, raw: &str| {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| ScrapeError::MalformedValue {
                field: field.to_owned(),
                value: raw.to_owned(),
                context: context.to_owned(),
            })
    };

    Ok((parse("height_cm", &height)?, parse("weight_kg", &weight)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_page(inner: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div id="info"><div id="meta">{inner}</div></div></body></html>"#
        ))
    }

    #[test]
    fn parses_metric_measurements() {
        assert_eq!(
            parse_measurements("6-8, 220lb (203cm, 100\u{a0}kg)", "test").unwrap(),
            (203, 100)
        );
    }

    #[test]
    fn parses_full_block() {
        let doc = meta_page(
            "<h1>\n  <span>Jayson Tatum</span>\n</h1>\
             <p>Pronunciation: \\JAY-sun TAY-tum\\</p>\
             <p><strong>Position:</strong> Small Forward</p>\
             <p><span>6-8</span>,&nbsp;<span>210lb</span>&nbsp;(203cm,&nbsp;95kg)</p>\
             <p>Born: March 3, 1998</p>",
        );

        let bio = parse_biography(&doc).unwrap();

        assert_eq!(
            bio,
            Biography {
                name: "Jayson Tatum".to_string(),
                height_cm: 203,
                weight_kg: 95,
            }
        );
    }

    #[test]
    fn missing_block_is_structural() {
        let doc = Html::parse_document("<html><body><h1>Lost</h1></body></html>");
        assert!(matches!(
            parse_biography(&doc),
            Err(ScrapeError::StructuralNotFound { ref element, .. }) if element == "div#meta"
        ));
    }

    #[test]
    fn missing_heading_is_structural() {
        let doc = meta_page("<p>a</p><p>b</p><p>(200cm, 90kg)</p>");
        assert!(matches!(
            parse_biography(&doc),
            Err(ScrapeError::StructuralNotFound { ref element, .. }) if element == "h1"
        ));
    }

    #[test]
    fn missing_third_paragraph_is_structural() {
        let doc = meta_page("<h1>Short Bio</h1><p>a</p><p>(200cm, 90kg)</p>");
        assert!(matches!(
            parse_biography(&doc),
            Err(ScrapeError::StructuralNotFound { ref element, .. }) if element == "third paragraph"
        ));
    }

    #[test]
    fn missing_parenthetical_is_missing_field() {
        assert!(matches!(
            parse_measurements("6-8, 220lb", "test"),
            Err(ScrapeError::MissingRequiredField { ref field, .. }) if field == "height_cm"
        ));
        assert!(matches!(
            parse_measurements("6-8, 220lb (203cm)", "test"),
            Err(ScrapeError::MissingRequiredField { ref field, .. }) if field == "weight_kg"
        ));
    }

    #[test]
    fn non_numeric_measurement_is_malformed() {
        assert!(matches!(
            parse_measurements("(6ft, 100kg)", "test"),
            Err(ScrapeError::MalformedValue { ref field, .. }) if field == "height_cm"
        ));
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Extraction and normalization of basketball-reference pages.
//!
//! Turns already-fetched documents into typed records:
//!
//! - [`roster::extract_roster_links`] finds the player pages linked from a
//!   team roster page.
//! - [`season::parse_seasons`] reads a player's per-game table into
//!   [`SeasonStatistics`](hoops_ref_player_models::SeasonStatistics)
//!   records keyed by year, typing each cell through [`normalize`].
//! - [`biography::parse_biography`] reads name, height and weight.
//! - [`player::parse_player`] composes the two into a
//!   [`Player`](hoops_ref_player_models::Player).
//!
//! This crate never touches the network. Callers fetch pages however they
//! like and hand over a parsed [`scraper::Html`].

pub mod biography;
pub mod normalize;
pub mod player;
pub mod roster;
pub mod season;
pub mod urls;

use scraper::{ElementRef, Selector};

/// Errors that can occur while extracting records from a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An expected container element is absent from the document.
    #[error("{element} not found ({context})")]
    StructuralNotFound {
        /// CSS selector or description of the missing element.
        element: String,
        /// Where the lookup happened (team, row, etc.).
        context: String,
    },

    /// A record lacks a value needed to build it.
    #[error("missing required field '{field}' ({context})")]
    MissingRequiredField {
        /// The field that was not present.
        field: String,
        /// Where the lookup happened.
        context: String,
    },

    /// A mapped value could not be converted to its expected type.
    #[error("malformed value '{value}' for '{field}' ({context})")]
    MalformedValue {
        /// The field being converted.
        field: String,
        /// The raw text that failed to convert.
        value: String,
        /// Where the conversion happened.
        context: String,
    },

    /// A CSS selector failed to compile.
    #[error("invalid CSS selector '{selector}': {message}")]
    Selector {
        /// The selector source.
        selector: String,
        /// Parser error message.
        message: String,
    },

    /// Any of the above, tagged with the page it came from.
    #[error("{url}: {source}")]
    Page {
        /// The page URL.
        url: String,
        /// The underlying failure.
        #[source]
        source: Box<Self>,
    },
}

impl ScrapeError {
    /// Wraps this error with the URL of the page being parsed.
    #[must_use]
    pub fn in_page(self, url: &str) -> Self {
        Self::Page {
            url: url.to_owned(),
            source: Box::new(self),
        }
    }

    /// Prefixes the error's context with an outer location (e.g. a table
    /// row). Variants without a context are returned unchanged.
    #[must_use]
    pub fn with_context(self, outer: &str) -> Self {
        match self {
            Self::StructuralNotFound { element, context } => Self::StructuralNotFound {
                element,
                context: format!("{outer}, {context}"),
            },
            Self::MissingRequiredField { field, context } => Self::MissingRequiredField {
                field,
                context: format!("{outer}, {context}"),
            },
            Self::MalformedValue {
                field,
                value,
                context,
            } => Self::MalformedValue {
                field,
                value,
                context: format!("{outer}, {context}"),
            },
            other @ (Self::Selector { .. } | Self::Page { .. }) => other,
        }
    }

    /// Returns the innermost error, looking through [`ScrapeError::Page`].
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Page { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_owned(),
        message: e.to_string(),
    })
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

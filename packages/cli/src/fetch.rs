//! HTTP page fetching for basketball-reference.
//!
//! The site rejects requests that do not look like a desktop browser, and
//! rate-limited sessions need the cookie from a logged-in browser. Both are
//! set once as default headers on the [`reqwest::Client`].

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Environment variable holding the optional `Cookie` header value.
pub const COOKIE_ENV_VAR: &str = "BASKETBALL_REFERENCE_COOKIE";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,\
    image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Errors that can occur while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// A configured header value is not valid in an HTTP header.
    #[error("invalid header value for '{name}': {message}")]
    Header {
        /// The header name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Fetches raw HTML pages with browser-like headers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Builds a fetcher, attaching `cookie` as the `Cookie` header when
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the cookie is not a valid header value or
    /// the client cannot be built.
    pub fn new(cookie: Option<&str>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(cookie)?)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Builds a fetcher using the cookie from [`COOKIE_ENV_VAR`], if set.
    ///
    /// # Errors
    ///
    /// See [`Fetcher::new`].
    pub fn from_env() -> Result<Self, FetchError> {
        let cookie = std::env::var(COOKIE_ENV_VAR).ok().filter(|c| !c.is_empty());
        if cookie.is_none() {
            log::warn!("{COOKIE_ENV_VAR} is not set; requests may be rate limited");
        }
        Self::new(cookie.as_deref())
    }

    /// GETs `url` and returns the body text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for any non-200 response, or
    /// [`FetchError::Http`] if the request or body read fails.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// The request headers sent with every page fetch.
///
/// # Errors
///
/// Returns [`FetchError::Header`] if `cookie` contains characters that are
/// not allowed in a header value.
pub fn default_headers(cookie: Option<&str>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    if let Some(cookie) = cookie {
        headers.insert(header::COOKIE, header_value(&header::COOKIE, cookie)?);
    }

    Ok(headers)
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::Header {
        name: name.to_string(),
        message: e.to_string(),
    })
}

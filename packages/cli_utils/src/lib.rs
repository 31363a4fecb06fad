#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal progress and logging for the `hoops_ref` binary.
//!
//! A league run shows one bar for teams and, under it, one bar per roster
//! being scraped. Log lines go through the same [`MultiProgress`] so they
//! print above the bars instead of tearing them.

pub mod progress;

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;
pub use progress::ProgressCallback;

/// Determinate bar template; `color` is an indicatif style such as `green`.
fn bar_style(prefix: &str, color: &str, suffix: &str) -> ProgressStyle {
    ProgressStyle::with_template(&format!(
        "{prefix}{{msg}} {{wide_bar:.{color}/dim}} {{pos}}/{{len}} {suffix}"
    ))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("##-")
}

/// Progress bar handed to the pipeline as a [`ProgressCallback`].
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Applied by `set_total`; rosters start as a spinner.
    sized_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Bar over the selected teams.
    #[must_use]
    pub fn teams_bar(multi: &MultiProgress, message: &str, total: u64) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new(total));
        let sized_style = bar_style("", "green", "[{elapsed_precise}]");
        bar.set_style(sized_style.clone());
        bar.set_message(message.to_string());

        Arc::new(Self { bar, sized_style })
    }

    /// Bar over one roster's players. Spins while the roster page loads,
    /// since the player count is unknown until its links are extracted.
    #[must_use]
    pub fn players_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let sized_style = bar_style("  ", "cyan", "{percent}% [{eta}]");

        Arc::new(Self { bar, sized_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.sized_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }

    fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Installs a `pretty_env_logger` logger (filtered by `RUST_LOG`) behind
/// `indicatif-log-bridge` and returns the [`MultiProgress`] every bar
/// must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // A second call keeps the logger installed by the first.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

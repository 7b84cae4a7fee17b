//! Progress UI (spinner) while waiting on the recommendation service.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Starts a spinner on stderr when `enabled`; returns `None` otherwise.
pub(crate) fn start_spinner(enabled: bool, message: String) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Clears the spinner line, if one was started.
pub(crate) fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{finish_spinner, start_spinner};

    #[test]
    fn test_disabled_spinner_is_none() {
        let spinner = start_spinner(false, "Fetching".to_string());
        assert!(spinner.is_none());
        finish_spinner(spinner);
    }

    #[test]
    fn test_enabled_spinner_carries_message() {
        let spinner = start_spinner(true, "Fetching recommendations for 3 DOIs".to_string());
        let message = spinner.as_ref().map(indicatif::ProgressBar::message);
        assert_eq!(
            message.as_deref(),
            Some("Fetching recommendations for 3 DOIs")
        );
        finish_spinner(spinner);
    }
}

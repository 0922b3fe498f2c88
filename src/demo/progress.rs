// file: src/demo/progress.rs
// description: spinner shown while waiting for indexed documents to become searchable
// reference: uses indicatif for progress display

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

/// Sleeps for `delay`, rendering a spinner on stderr when it is a terminal.
/// Best-effort only: the service gives no visibility guarantee.
pub async fn settle(delay: Duration, message: &str) {
    if delay.is_zero() {
        return;
    }

    debug!(delay_ms = delay.as_millis() as u64, "Waiting for index propagation");

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    tokio::time::sleep(delay).await;

    spinner.finish_and_clear();
}

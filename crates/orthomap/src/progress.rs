//! Progress bar over mapper batches

use indicatif::{ProgressBar, ProgressStyle};

const BATCH_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} batches ({eta})";

/// Create a progress bar for `total` batches
///
/// Returns a hidden bar when `visible` is false so callers can tick it
/// unconditionally.
pub fn batch_progress(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(BATCH_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

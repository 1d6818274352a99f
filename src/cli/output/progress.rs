//! Progress bar utilities using indicatif for terminal output
//!
//! Bars draw to stderr and are hidden in JSON mode so stdout carries only
//! command output.

use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Create a progress bar for an operation with `total` steps
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_CHARS);

    ProgressBar::new(total).with_style(style)
}

/// Progress bar for a bulk import, hidden when `visible` is false
pub fn create_import_progress(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = create_progress_bar(total);
    pb.set_message("importing recipes");
    pb
}

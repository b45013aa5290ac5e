use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::OutputFormat;

/// Spinner that clears itself when dropped.
///
/// Only shown for pretty output so JSON on stdout stays clean.
pub struct Spinner(Option<ProgressBar>);

pub fn new(message: &str, output: &OutputFormat) -> Spinner {
    if !matches!(output, OutputFormat::Pretty) {
        return Spinner(None);
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Spinner(Some(pb))
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.0.take() {
            pb.finish_and_clear();
        }
    }
}

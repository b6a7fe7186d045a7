//! Progress indicators for long-running operations using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

/// A spinner for indeterminate progress. Draws to stderr, only on a TTY.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create and start a spinner with the given message.
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}...") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    /// Clear the spinner line.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `work` with a spinner showing `message`.
pub fn with_spinner<T>(ctx: &UiContext, message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::start(ctx, message);
    let result = work();
    spinner.finish();
    result
}

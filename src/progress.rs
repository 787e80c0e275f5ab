//! Short progress indicators shown between console steps.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Shows a spinner with a message for a fixed time, then a completion line.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    duration: Duration,
}

impl Indicator {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Skips the pause entirely.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Spin with `message` for the configured duration and finish with `done`.
    /// Draws on stderr and stays hidden when that is not a terminal.
    pub fn run(&self, message: &str, done: &str) {
        if !self.is_enabled() {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK);
        std::thread::sleep(self.duration);
        pb.finish_with_message(done.to_string());
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn disabled_indicator_returns_immediately() {
        let indicator = Indicator::disabled();
        assert!(!indicator.is_enabled());

        let start = Instant::now();
        indicator.run("Processing Invoice...", "Processing Invoice completed!");
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn default_indicator_is_enabled() {
        assert!(Indicator::default().is_enabled());
    }
}

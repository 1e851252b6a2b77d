//! Transient status toast with a fixed auto-hide delay.

use std::time::Duration;
use tokio::time::Instant;

/// Default time a confirmation stays on screen.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Confirmation line shown after a successful copy.
pub fn copied_message(url: &str) -> String {
    format!("URL copied to clipboard: {url}")
}

/// A single status message that auto-hides after a fixed delay.
///
/// There is no queue: showing a new message while one is visible replaces
/// the text and re-arms the deadline, so the last call wins. Uses
/// `tokio::time::Instant` so tests run against a paused clock.
#[derive(Debug)]
pub struct Toast {
    message: String,
    duration: Duration,
    deadline: Option<Instant>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            message: String::new(),
            duration,
            deadline: None,
        }
    }

    /// Show a message and arm the auto-hide deadline.
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.deadline = Some(Instant::now() + self.duration);
    }

    /// Clear the deadline once it has passed. Called from the event loop.
    pub fn tick(&mut self) {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.deadline = None;
            }
        }
    }

    /// Whether the message is currently shown. Compares against the
    /// deadline directly, so it is correct even between ticks.
    pub fn visible(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() < deadline)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

//! Request deadlines carried from inbound requests to outbound calls

use std::time::{Duration, Instant};

/// Point in time after which no outbound call may still be waiting.
///
/// One deadline is shared by every call a request makes, so sequential
/// calls draw on the same budget and a later call only gets what is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline. Calls wait as long as the HTTP client allows.
    pub fn unbounded() -> Self {
        Self { at: None }
    }

    pub fn after(budget: Duration) -> Self {
        Self {
            at: Some(Instant::now() + budget),
        }
    }

    /// Time left, or `None` for an unbounded deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Remaining time as reported in timeout errors; zero means unbounded.
    pub fn max_timeout(&self) -> Duration {
        self.remaining().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == Some(Duration::ZERO)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Debounced search input.
//!
//! Every keystroke cancels the pending request. A query is released only
//! after a quiet period and only if it is long enough.

use crate::config::{DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_SEARCH_MIN_CHARS};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    min_chars: usize,
    pending: Option<(String, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            DEFAULT_SEARCH_MIN_CHARS,
        )
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration, min_chars: usize) -> Self {
        Self {
            delay,
            min_chars,
            pending: None,
        }
    }

    /// Records a keystroke. Short queries cancel without rescheduling.
    pub fn input(&mut self, query: &str, now: Instant) {
        self.pending = (query.chars().count() >= self.min_chars)
            .then(|| (query.to_string(), now + self.delay));
    }

    /// Releases the pending query once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(query, _)| query)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

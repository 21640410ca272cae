// SPDX-License-Identifier: MPL-2.0
//! Entry/exit staging shared by toasts and dialogs.
//!
//! An element is attached in the [`Phase::Entering`] state, becomes
//! [`Phase::Shown`] once the entry delay has elapsed, and is detached when a
//! [`Phase::Leaving`] element has outlived the exit grace period.

use crate::config::{DEFAULT_ENTRY_DELAY_MS, DEFAULT_EXIT_GRACE_MS};
use crate::ui::design_tokens::opacity;
use std::time::{Duration, Instant};

/// Visual lifecycle of an attached element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Attached, still in its initial hidden state.
    Entering,
    /// Fully visible.
    Shown,
    /// Exit transition running since the given instant.
    Leaving { since: Instant },
}

impl Phase {
    #[must_use]
    pub fn is_leaving(&self) -> bool {
        matches!(self, Phase::Leaving { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub entry_delay: Duration,
    pub exit_grace: Duration,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_ENTRY_DELAY_MS),
            Duration::from_millis(DEFAULT_EXIT_GRACE_MS),
        )
    }
}

impl Transition {
    #[must_use]
    pub fn new(entry_delay: Duration, exit_grace: Duration) -> Self {
        Self {
            entry_delay,
            exit_grace,
        }
    }

    /// Moves an entering element to `Shown` once its entry delay has passed.
    #[must_use]
    pub fn advance(&self, phase: Phase, attached_at: Instant, now: Instant) -> Phase {
        match phase {
            Phase::Entering if now >= attached_at + self.entry_delay => Phase::Shown,
            other => other,
        }
    }

    /// Returns whether a leaving element is due for detachment.
    #[must_use]
    pub fn is_finished(&self, phase: Phase, now: Instant) -> bool {
        match phase {
            Phase::Leaving { since } => now >= since + self.exit_grace,
            Phase::Entering | Phase::Shown => false,
        }
    }

    /// Opacity to render an element with in the given phase.
    #[must_use]
    pub fn opacity(&self, phase: Phase, now: Instant) -> f32 {
        match phase {
            Phase::Entering => opacity::TRANSPARENT,
            Phase::Shown => opacity::OPAQUE,
            Phase::Leaving { since } => {
                if self.exit_grace.is_zero() {
                    return opacity::TRANSPARENT;
                }
                let elapsed = now.saturating_duration_since(since).as_secs_f32();
                let progress = (elapsed / self.exit_grace.as_secs_f32()).min(1.0);
                opacity::OPAQUE - progress
            }
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for timing and server defaults.
//!
//! # Categories
//!
//! - **Server**: Forum base URL and request timeout
//! - **Transitions**: Entry delay and exit grace of toasts and dialogs
//! - **Search**: Debounce window and minimum query length
//! - **Notifications**: Auto-dismiss duration per severity

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Forum server used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Delay between attaching an element and applying its entry transition.
///
/// One scheduler tick: long enough for the hidden state to be observable.
pub const DEFAULT_ENTRY_DELAY_MS: u64 = 10;

/// Time the exit transition runs before the element is detached.
pub const DEFAULT_EXIT_GRACE_MS: u64 = 300;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Quiet period after the last keystroke before a search request is issued.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Queries shorter than this never reach the server.
pub const DEFAULT_SEARCH_MIN_CHARS: usize = 3;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Auto-dismiss delay for success toasts.
pub const DEFAULT_SUCCESS_DURATION_MS: u64 = 5000;

/// Auto-dismiss delay for informational toasts.
pub const DEFAULT_INFO_DURATION_MS: u64 = 5000;

/// Auto-dismiss delay for warning toasts.
pub const DEFAULT_WARNING_DURATION_MS: u64 = 6000;

/// Auto-dismiss delay for error toasts. Errors stay up longer.
pub const DEFAULT_ERROR_DURATION_MS: u64 = 8000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_ENTRY_DELAY_MS < DEFAULT_EXIT_GRACE_MS);
    assert!(DEFAULT_ERROR_DURATION_MS > DEFAULT_WARNING_DURATION_MS);
    assert!(DEFAULT_WARNING_DURATION_MS > DEFAULT_SUCCESS_DURATION_MS);
    assert!(DEFAULT_SUCCESS_DURATION_MS == DEFAULT_INFO_DURATION_MS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
};

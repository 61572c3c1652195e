//! Debounced input buffer.
//!
//! Raw input updates immediately. The effective value adopts the raw value
//! only after a quiet interval with no further input. There is no timer
//! thread: the caller passes its clock to [`DebouncedInput::input`] and
//! [`DebouncedInput::poll`], and the pending adoption is just a deadline
//! that new input moves and [`DebouncedInput::cancel`] clears.

use std::time::{Duration, Instant};

use directory_model::DEFAULT_SEARCH_DEBOUNCE_MS;

/// Default quiet interval for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS);

/// A value whose effective copy lags its raw copy by a quiet interval.
#[derive(Debug, Clone)]
pub struct DebouncedInput<T> {
    raw: T,
    effective: T,
    delay: Duration,
    deadline: Option<Instant>,
}

impl<T: Default + Clone + PartialEq> Default for DebouncedInput<T> {
    fn default() -> Self {
        Self::new(T::default(), DEFAULT_DEBOUNCE)
    }
}

impl<T: Clone + PartialEq> DebouncedInput<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            raw: initial.clone(),
            effective: initial,
            delay,
            deadline: None,
        }
    }

    /// The value as typed.
    pub fn raw(&self) -> &T {
        &self.raw
    }

    /// The settled value used for querying.
    pub fn effective(&self) -> &T {
        &self.effective
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// When the pending adoption fires, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record new raw input at `now`, restarting the quiet interval.
    pub fn input(&mut self, value: T, now: Instant) {
        self.raw = value;
        self.deadline = Some(now + self.delay);
    }

    /// Adopt the raw value if the quiet interval has elapsed by `now`.
    ///
    /// Returns the new effective value only when it actually changed. Fires
    /// at most once per quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.adopt(),
            _ => None,
        }
    }

    /// Adopt the raw value immediately.
    pub fn flush(&mut self) -> Option<&T> {
        if self.deadline.is_none() && self.raw == self.effective {
            return None;
        }
        self.adopt()
    }

    /// Drop the pending adoption. The raw value is kept.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancel any pending adoption before the buffer is discarded.
    pub fn teardown(&mut self) {
        self.cancel();
    }

    /// Set both raw and effective values at once, cancelling any pending
    /// adoption.
    pub fn reset(&mut self, value: T) {
        self.raw = value.clone();
        self.effective = value;
        self.deadline = None;
    }

    fn adopt(&mut self) -> Option<&T> {
        self.deadline = None;
        if self.effective == self.raw {
            return None;
        }
        self.effective = self.raw.clone();
        Some(&self.effective)
    }
}

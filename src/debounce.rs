//! Temporal debouncing shared by the touch and button input variants.

use embassy_time::{Duration, Instant};

use crate::DEBOUNCE_WINDOW_MS;

/// Outcome of feeding one raw sample into a [`Debouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// No observable change this cycle.
    Idle,
    /// The raw level just flipped; the debounce window restarted. Callers
    /// should postpone sleep so the device stays awake through the bounce.
    Settling,
    /// The raw level held for the full window; the confirmed state now
    /// matches it. Carries the new confirmed state (`true` = pressed).
    Confirmed(bool),
}

/// Tracks the debounce state of a single logical input.
///
/// The confirmed state changes only after the raw level has held steady for
/// the whole debounce window, and only ever changes to match the raw level.
/// The clock is passed into [`update`](Debouncer::update) by the caller, one
/// reading per polling cycle.
pub struct Debouncer {
    /// Last instantaneously sampled logical level.
    raw_state: bool,
    /// When `raw_state` last changed.
    last_transition: Instant,
    /// The debounced, externally visible state.
    confirmed_state: bool,
    window_ms: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// A debouncer with the standard window, starting released.
    pub const fn new() -> Self {
        Self::with_window(Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }

    /// A debouncer with a custom window.
    pub const fn with_window(window: Duration) -> Self {
        Self {
            raw_state: false,
            last_transition: Instant::from_ticks(0),
            confirmed_state: false,
            window_ms: window.as_millis(),
        }
    }

    /// Feed one raw sample taken at `now`.
    pub fn update(&mut self, raw: bool, now: Instant) -> DebounceState {
        if raw != self.raw_state {
            // The level flipped. Don't trust it yet: it has to stay put for
            // the whole window (rules out contact bounce and 50/60 Hz pickup).
            self.raw_state = raw;
            self.last_transition = now;
            return DebounceState::Settling;
        }
        if self.raw_state != self.confirmed_state
            && elapsed_ms(now.as_millis(), self.last_transition.as_millis()) >= self.window_ms
        {
            self.confirmed_state = self.raw_state;
            return DebounceState::Confirmed(self.confirmed_state);
        }
        DebounceState::Idle
    }

    /// The current debounced state (`true` = pressed).
    pub fn confirmed(&self) -> bool {
        self.confirmed_state
    }

    /// Align both the raw and confirmed state with a known level, e.g. the
    /// level sampled once at setup. Does not emit a transition.
    pub(crate) fn reset_to(&mut self, state: bool) {
        self.raw_state = state;
        self.confirmed_state = state;
    }
}

/// Milliseconds from `since_ms` to `now_ms` on a wrapping monotonic clock.
/// The add-then-compare form (`now > since + window`) misbehaves near the
/// counter wrap; wrapping subtraction does not.
fn elapsed_ms(now_ms: u64, since_ms: u64) -> u64 {
    now_ms.wrapping_sub(since_ms)
}

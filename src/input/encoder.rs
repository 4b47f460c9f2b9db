//! Quadrature rotary encoder input.

use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::config::{ActivationConfig, EncoderConfig};
use crate::debounce::{DebounceState, Debouncer};
use crate::input::SLEEP_SETTLE_POSTPONE;
use crate::power::PowerControl;
use crate::wake::WakeRequests;

/// The encoder direction is either `Clockwise` or `CounterClockwise`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// A clockwise step; counted as an increment.
    Clockwise,
    /// A counterclockwise step; counted as a decrement.
    CounterClockwise,
}

/// A two-line quadrature rotary encoder.
///
/// Both lines are pulled-up inputs, so the driven (low) level reads as
/// logical true. Direction is decoded on every transition of line A by
/// comparing against line B: a step where the lines disagree is clockwise,
/// one where they agree is counterclockwise.
///
/// By default no temporal debouncing is applied to the lines: detented
/// encoders are usually clean, and a bouncy A line will produce spurious
/// counts. Pass [`EncoderConfig::debounce`] to filter line A through the
/// shared debouncer instead; see the note there about detent dwell time.
pub struct RotaryEncoder<'a, In: InputPin> {
    pin_a: In,
    pin_b: In,
    pin_a_num: u8,
    pin_b_num: u8,
    config: ActivationConfig,
    /// Last sampled state of line A.
    phase_a: bool,
    /// Net step count; wraps at the integer boundary.
    value: i32,
    debouncer: Option<Debouncer>,
    callback: Option<&'a dyn Fn()>,
}

impl<'a, In: InputPin> RotaryEncoder<'a, In> {
    /// An encoder that acts on both directions (the callback fires for
    /// clockwise steps as "press" and counterclockwise steps as "release").
    /// Pins must already be configured as pulled-up inputs; the pin numbers
    /// matter only when `wake` is set.
    pub fn new(pin_a: In, pin_b: In, pin_a_num: u8, pin_b_num: u8, wake: bool) -> Self {
        let mut config = ActivationConfig::on_both();
        config.wake = wake;
        Self::with_config(pin_a, pin_b, pin_a_num, pin_b_num, config, EncoderConfig::default())
    }

    pub fn with_config(
        pin_a: In,
        pin_b: In,
        pin_a_num: u8,
        pin_b_num: u8,
        config: ActivationConfig,
        encoder: EncoderConfig,
    ) -> Self {
        Self {
            pin_a,
            pin_b,
            pin_a_num,
            pin_b_num,
            config,
            phase_a: false,
            value: 0,
            debouncer: encoder.debounce.map(Debouncer::with_window),
            callback: None,
        }
    }

    /// Attach the activation callback. One slot, last write wins.
    pub fn set_callback(&mut self, callback: &'a dyn Fn()) {
        self.callback = Some(callback);
    }

    /// Net step count since construction.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// One-time setup: latch the starting phase of line A and contribute
    /// wake intent. Rotation in either direction releases one of the lines
    /// high, so both pins join the high-level wake mask.
    pub fn setup(&mut self, wake: &mut WakeRequests) {
        self.phase_a = self.pin_a.is_low().ok().unwrap_or_default();
        if let Some(debouncer) = &mut self.debouncer {
            debouncer.reset_to(self.phase_a);
        }
        if self.config.wake {
            wake.request_high_level(self.pin_a_num);
            wake.request_high_level(self.pin_b_num);
        }
    }

    /// Sample line A once at `now` and decode one step if it moved.
    /// Unreadable pins skip the cycle.
    pub fn poll<P: PowerControl>(&mut self, now: Instant, power: &mut P) {
        let Ok(state_a) = self.pin_a.is_low() else {
            return;
        };
        match &mut self.debouncer {
            None => {
                if state_a == self.phase_a {
                    return;
                }
                self.phase_a = state_a;
            }
            Some(debouncer) => match debouncer.update(state_a, now) {
                DebounceState::Settling => {
                    power.postpone_sleep(SLEEP_SETTLE_POSTPONE);
                    return;
                }
                DebounceState::Idle => return,
                DebounceState::Confirmed(state) => self.phase_a = state,
            },
        }
        // A moved: B tells us which way.
        let Ok(state_b) = self.pin_b.is_low() else {
            return;
        };
        let direction = if self.phase_a != state_b {
            self.value = self.value.wrapping_add(1);
            Direction::Clockwise
        } else {
            self.value = self.value.wrapping_sub(1);
            Direction::CounterClockwise
        };
        debug!(
            "encoder pins {},{} step {:?}, value {}",
            self.pin_a_num, self.pin_b_num, direction, self.value
        );
        let qualifies = match direction {
            Direction::Clockwise => self.config.act_on_press,
            Direction::CounterClockwise => self.config.act_on_release,
        };
        if qualifies {
            if let Some(callback) = self.callback {
                callback();
            }
        }
    }

    /// Consume the encoder, returning the underlying pins `A` and `B`.
    pub fn into_inner(self) -> (In, In) {
        (self.pin_a, self.pin_b)
    }
}

//! Capacitive touch input.

use embassy_time::Instant;

use crate::config::{ActivationConfig, TouchConfig};
use crate::debounce::{DebounceState, Debouncer};
use crate::input::SLEEP_SETTLE_POSTPONE;
use crate::power::PowerControl;
use crate::wake::WakeRequests;

/// Reading reported by a touch peripheral when it has no signal for the pad
/// (sensor idle or mid-conversion). Such cycles carry no information and are
/// skipped, they neither start nor end a debounce window.
pub const NO_SIGNAL: u16 = 0;

/// A capacitive touch peripheral channel.
///
/// Implemented by platform code over the touch controller; on ESP32 class
/// parts this wraps one touch channel of the touch-sense peripheral.
pub trait TouchSensor {
    /// Raw proximity reading for the pad. Readings drop as a finger comes
    /// closer; [`NO_SIGNAL`] means "nothing sampled this cycle".
    fn read(&mut self) -> u16;

    /// Arm the touch-wake interrupt for this pad at the given threshold.
    ///
    /// The interrupt only has to exist so the sleep controller can use it as
    /// a wake trigger; press detection always happens by polling, so the
    /// handler may be a no-op.
    fn arm_wakeup(&mut self, threshold: u16);
}

/// Type filler for the touch slot of banks that have no touch pads. Always
/// reads [`NO_SIGNAL`].
pub struct NoTouch;

impl TouchSensor for NoTouch {
    fn read(&mut self) -> u16 {
        NO_SIGNAL
    }

    fn arm_wakeup(&mut self, _threshold: u16) {}
}

/// A debounced capacitive touch pad.
pub struct Touchpad<'a, T: TouchSensor> {
    sensor: T,
    config: ActivationConfig,
    threshold: u16,
    debouncer: Debouncer,
    callback: Option<&'a dyn Fn()>,
}

impl<'a, T: TouchSensor> Touchpad<'a, T> {
    /// A touch pad with the default threshold.
    pub fn new(sensor: T, config: ActivationConfig) -> Self {
        Self::with_config(sensor, config, TouchConfig::default())
    }

    pub fn with_config(sensor: T, config: ActivationConfig, touch: TouchConfig) -> Self {
        Self {
            sensor,
            config,
            threshold: touch.threshold,
            debouncer: Debouncer::new(),
            callback: None,
        }
    }

    /// Attach the activation callback. One slot, last write wins.
    pub fn set_callback(&mut self, callback: &'a dyn Fn()) {
        self.callback = Some(callback);
    }

    /// The debounced pressed state.
    pub fn is_pressed(&self) -> bool {
        self.debouncer.confirmed()
    }

    /// One-time setup: contribute wake intent and arm the touch-wake
    /// interrupt when configured to do so.
    pub fn setup(&mut self, wake: &mut WakeRequests) {
        if self.config.wake {
            wake.request_touch();
            self.sensor.arm_wakeup(self.threshold);
        }
    }

    /// Sample the pad once at `now` and run the debounce step.
    pub fn poll<P: PowerControl>(&mut self, now: Instant, power: &mut P) {
        let reading = self.sensor.read();
        if reading == NO_SIGNAL {
            return;
        }
        let raw = reading < self.threshold;
        match self.debouncer.update(raw, now) {
            DebounceState::Settling => power.postpone_sleep(SLEEP_SETTLE_POSTPONE),
            DebounceState::Confirmed(pressed) => {
                debug!("touchpad confirmed state {}, reading {}", pressed, reading);
                if self.config.should_activate(pressed) {
                    if let Some(callback) = self.callback {
                        callback();
                    }
                }
            }
            DebounceState::Idle => {}
        }
    }

    /// Consume the pad, returning the underlying sensor.
    pub fn into_inner(self) -> T {
        self.sensor
    }
}

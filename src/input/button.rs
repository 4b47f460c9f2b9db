//! Mechanical button input.

use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::config::ActivationConfig;
use crate::debounce::{DebounceState, Debouncer};
use crate::input::SLEEP_SETTLE_POSTPONE;
use crate::power::PowerControl;
use crate::wake::WakeRequests;

/// A debounced mechanical button.
///
/// The switch is expected to connect the pin to ground, with the pin
/// configured by the HAL as a pulled-up input: an open (or disconnected)
/// switch reads released, a closed switch reads pressed.
pub struct Button<'a, In: InputPin> {
    pin: In,
    /// GPIO number of `pin`, used for wake-source registration.
    pin_num: u8,
    config: ActivationConfig,
    debouncer: Debouncer,
    callback: Option<&'a dyn Fn()>,
}

impl<'a, In: InputPin> Button<'a, In> {
    /// `pin` must already be configured as a pulled-up input; `pin_num` is
    /// its GPIO number, which only matters when `config.wake` is set.
    pub fn new(pin: In, pin_num: u8, config: ActivationConfig) -> Self {
        Self {
            pin,
            pin_num,
            config,
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

    /// One-time setup: contribute wake intent.
    ///
    /// A press drives the pin low, so a press-activated button claims the
    /// single low-level wake slot; a release-activated one joins the
    /// high-level wake mask instead.
    pub fn setup(&mut self, wake: &mut WakeRequests) {
        if self.config.wake {
            if self.config.act_on_press {
                wake.request_low_level(self.pin_num);
            } else {
                wake.request_high_level(self.pin_num);
            }
        }
    }

    /// Sample the pin once at `now` and run the debounce step. An unreadable
    /// pin skips the cycle.
    pub fn poll<P: PowerControl>(&mut self, now: Instant, power: &mut P) {
        let Ok(raw) = self.pin.is_low() else {
            return;
        };
        match self.debouncer.update(raw, now) {
            DebounceState::Settling => power.postpone_sleep(SLEEP_SETTLE_POSTPONE),
            DebounceState::Confirmed(pressed) => {
                debug!("button pin {} confirmed state {}", self.pin_num, pressed);
                if self.config.should_activate(pressed) {
                    if let Some(callback) = self.callback {
                        callback();
                    }
                }
            }
            DebounceState::Idle => {}
        }
    }

    /// Consume the button, returning the underlying pin.
    pub fn into_inner(self) -> In {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use embassy_time::Duration;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::MockError;

    use super::*;
    use crate::power::DummyPower;
    use crate::DEBOUNCE_WINDOW_MS;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[derive(Default)]
    struct RecordingPower {
        postponed: Vec<u64>,
    }

    impl PowerControl for RecordingPower {
        type Error = core::convert::Infallible;

        fn postpone_sleep(&mut self, min: Duration) {
            self.postponed.push(min.as_millis());
        }

        fn enable_touch_wake(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn enable_high_level_wake(&mut self, _mask: u64) -> Result<(), Self::Error> {
            Ok(())
        }

        fn enable_low_level_wake(&mut self, _pin: u8) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Pin 5, act on press only, no wake. Released for 100ms, then pressed.
    /// The callback fires exactly once, one debounce window after the press
    /// edge, not at the instant of the raw transition.
    #[test]
    fn press_fires_once_after_the_debounce_window() {
        let mut transactions = Vec::new();
        for _ in 0..10 {
            transactions.push(PinTransaction::get(PinState::High));
        }
        for _ in 0..10 {
            transactions.push(PinTransaction::get(PinState::Low));
        }
        let mut pin = PinMock::new(&transactions);

        let fired = Cell::new(0u32);
        let callback = || fired.set(fired.get() + 1);
        let mut button = Button::new(pin.clone(), 5, ActivationConfig::on_press());
        button.set_callback(&callback);

        let mut power = RecordingPower::default();
        for i in 0..20u64 {
            let t = i * 10;
            button.poll(at(t), &mut power);
            if t < 150 {
                assert_eq!(fired.get(), 0, "fired before the window elapsed, t={}", t);
            }
        }
        // Press edge at t=100, confirmed at t=150.
        assert_eq!(fired.get(), 1);
        assert!(button.is_pressed());
        // One raw transition, one sleep postponement of twice the window.
        assert_eq!(power.postponed, vec![DEBOUNCE_WINDOW_MS * 2]);
        pin.done();
    }

    #[test]
    fn release_without_act_on_release_stays_silent() {
        let mut transactions = Vec::new();
        for _ in 0..8 {
            transactions.push(PinTransaction::get(PinState::Low));
        }
        for _ in 0..8 {
            transactions.push(PinTransaction::get(PinState::High));
        }
        let mut pin = PinMock::new(&transactions);

        let fired = Cell::new(0u32);
        let callback = || fired.set(fired.get() + 1);
        let mut button = Button::new(pin.clone(), 5, ActivationConfig::on_press());
        button.set_callback(&callback);

        let mut power = DummyPower;
        for i in 0..16u64 {
            button.poll(at(i * 10), &mut power);
        }
        // Only the press fired; the release changed state silently.
        assert_eq!(fired.get(), 1);
        assert!(!button.is_pressed());
        pin.done();
    }

    #[test]
    fn unreadable_pin_skips_the_cycle() {
        let transactions = [
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low).with_error(MockError::Io(std::io::ErrorKind::NotConnected)),
            PinTransaction::get(PinState::Low),
        ];
        let mut pin = PinMock::new(&transactions);
        let mut button = Button::new(pin.clone(), 5, ActivationConfig::on_press());

        let mut power = DummyPower;
        button.poll(at(0), &mut power);
        button.poll(at(30), &mut power); // read error, no new information
        button.poll(at(50), &mut power);
        // The window still completed off the t=0 edge.
        assert!(button.is_pressed());
        pin.done();
    }

    #[test]
    fn callback_slot_is_last_write_wins() {
        let mut pin = PinMock::new(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
        ]);
        let first = Cell::new(0u32);
        let second = Cell::new(0u32);
        let first_callback = || first.set(first.get() + 1);
        let second_callback = || second.set(second.get() + 1);

        let mut button = Button::new(pin.clone(), 4, ActivationConfig::on_press());
        button.set_callback(&first_callback);
        button.set_callback(&second_callback);

        let mut power = DummyPower;
        button.poll(at(0), &mut power);
        button.poll(at(50), &mut power);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        pin.done();
    }

    #[test]
    fn no_callback_attached_is_a_no_op() {
        let mut pin = PinMock::new(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
        ]);
        let mut button = Button::new(pin.clone(), 4, ActivationConfig::on_press());
        let mut power = DummyPower;
        button.poll(at(0), &mut power);
        button.poll(at(50), &mut power);
        // State still tracked, nothing to invoke.
        assert!(button.is_pressed());
        pin.done();
    }

    #[test]
    fn wake_routing_depends_on_the_activation_edge() {
        let mut pin = PinMock::new(&[]);

        let mut press_button = Button::new(pin.clone(), 5, ActivationConfig::on_press().with_wake());
        let mut wake = WakeRequests::new();
        press_button.setup(&mut wake);
        assert_eq!(wake.low_pin(), Some(5));
        assert_eq!(wake.high_mask(), 0);

        let mut release_button = Button::new(pin.clone(), 12, ActivationConfig::on_release().with_wake());
        let mut wake = WakeRequests::new();
        release_button.setup(&mut wake);
        assert_eq!(wake.low_pin(), None);
        assert_eq!(wake.high_mask(), 1 << 12);

        let mut plain = Button::new(pin.clone(), 7, ActivationConfig::on_press());
        let mut wake = WakeRequests::new();
        plain.setup(&mut wake);
        assert_eq!(wake.low_pin(), None);
        assert_eq!(wake.high_mask(), 0);
        pin.done();
    }
}

//! The input variants and the closed [`Input`] type over them.
//!
//! Every physical input is one of touch pad, button, or rotary encoder.
//! Keeping the set closed lets the bank dispatch exhaustively instead of
//! going through open-ended trait objects.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::power::PowerControl;
use crate::wake::WakeRequests;
use crate::DEBOUNCE_WINDOW_MS;

pub mod button;
pub mod encoder;
pub mod touch;

pub use button::Button;
pub use encoder::{Direction, RotaryEncoder};
pub use touch::{NoTouch, TouchSensor, Touchpad};

/// How long to hold off sleep after a raw level flip: twice the debounce
/// window, so the device cannot doze off in the middle of a bounce.
pub(crate) const SLEEP_SETTLE_POSTPONE: Duration = Duration::from_millis(DEBOUNCE_WINDOW_MS * 2);

/// One configured physical input.
///
/// `In` is the digital pin type shared by buttons and encoder lines
/// (HALs with heterogeneous pin types can erase them to their `AnyPin`);
/// `T` is the touch peripheral channel. For a bank without touch pads, use
/// [`touch::NoTouch`] as the `T` filler.
pub enum Input<'a, In: InputPin, T: TouchSensor> {
    Touch(Touchpad<'a, T>),
    Button(Button<'a, In>),
    Encoder(RotaryEncoder<'a, In>),
}

impl<'a, In: InputPin, T: TouchSensor> Input<'a, In, T> {
    /// One-time setup, contributing this input's wake intent to `wake`.
    pub fn setup(&mut self, wake: &mut WakeRequests) {
        match self {
            Input::Touch(touchpad) => touchpad.setup(wake),
            Input::Button(button) => button.setup(wake),
            Input::Encoder(encoder) => encoder.setup(wake),
        }
    }

    /// Sample and evaluate this input once at `now`.
    pub fn poll<P: PowerControl>(&mut self, now: Instant, power: &mut P) {
        match self {
            Input::Touch(touchpad) => touchpad.poll(now, power),
            Input::Button(button) => button.poll(now, power),
            Input::Encoder(encoder) => encoder.poll(now, power),
        }
    }

    /// Attach the activation callback. One slot, last write wins.
    pub fn set_callback(&mut self, callback: &'a dyn Fn()) {
        match self {
            Input::Touch(touchpad) => touchpad.set_callback(callback),
            Input::Button(button) => button.set_callback(callback),
            Input::Encoder(encoder) => encoder.set_callback(callback),
        }
    }
}

impl<'a, In: InputPin, T: TouchSensor> From<Touchpad<'a, T>> for Input<'a, In, T> {
    fn from(touchpad: Touchpad<'a, T>) -> Self {
        Input::Touch(touchpad)
    }
}

impl<'a, In: InputPin, T: TouchSensor> From<Button<'a, In>> for Input<'a, In, T> {
    fn from(button: Button<'a, In>) -> Self {
        Input::Button(button)
    }
}

impl<'a, In: InputPin, T: TouchSensor> From<RotaryEncoder<'a, In>> for Input<'a, In, T> {
    fn from(encoder: RotaryEncoder<'a, In>) -> Self {
        Input::Encoder(encoder)
    }
}

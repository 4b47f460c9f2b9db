//! # drowse
//!
//! Input event handling for battery-powered devices: debounced touch pads and
//! buttons, quadrature rotary encoders, and aggregation of per-input wake
//! requirements into the wake-source primitives of the platform's low-power
//! sleep controller.
//!
//! ## Modules
//!
//! - [`debounce`] - Temporal debouncing shared by touch and button inputs
//! - [`input`] - The input variants: [`Touchpad`], [`Button`], [`RotaryEncoder`]
//! - [`wake`] - Wake-request aggregation across all inputs
//! - [`power`] - The [`PowerControl`] boundary to the platform sleep controller
//! - [`bank`] - [`InputBank`], which owns the inputs and drives setup/polling
//! - [`config`] - Per-input configuration structs
//!
//! Inputs are constructed once with immutable policy flags, collected into an
//! [`InputBank`], and polled cooperatively. On a qualifying debounced
//! transition an input invokes its registered activation callback. During the
//! one-time setup pass each input contributes its wake intent to a
//! [`wake::WakeRequests`] aggregate, which is applied to the platform's
//! [`PowerControl`] exactly once.
//!
//! ```ignore
//! let mut bank = InputBank::new(
//!     [
//!         Button::new(play_pin, 5, ActivationConfig::on_press().with_wake()).into(),
//!         RotaryEncoder::new(enc_a, enc_b, 2, 3, true).into(),
//!     ],
//!     power,
//! );
//! bank.setup();
//! bank.run().await; // or call bank.poll() from your own loop
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod bank;
pub mod config;
pub mod debounce;
pub mod input;
pub mod power;
pub mod wake;

pub use bank::InputBank;
pub use config::{ActivationConfig, EncoderConfig, TouchConfig};
pub use debounce::{DebounceState, Debouncer};
pub use input::button::Button;
pub use input::encoder::RotaryEncoder;
pub use input::touch::{NoTouch, TouchSensor, Touchpad};
pub use input::Input;
pub use power::{DummyPower, PowerControl};
pub use wake::WakeRequests;

/// Minimum time a raw input level must hold before its state is trusted,
/// in milliseconds. Sized to ride out contact bounce and mains-frequency
/// interference on capacitive pads.
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

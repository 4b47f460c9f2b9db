//! The boundary to the platform's low-power sleep controller.
//!
//! This crate never enters or leaves sleep itself. It only asks the
//! controller to hold off sleep while an input is settling, and programs the
//! wake-source primitives once at setup. Everything behind this trait is
//! platform code (on an ESP32 class part, the `esp_sleep_enable_*` family).

use embassy_time::Duration;

/// Sleep postponement and wake-source programming, as offered by the
/// platform power controller.
///
/// All methods are fire-and-forget from the caller's perspective: enable
/// failures are reported back so they can be logged, but nothing in this
/// crate treats them as fatal.
pub trait PowerControl {
    /// Platform error for the wake-enable calls.
    type Error: core::fmt::Debug;

    /// Request that sleep not be entered for at least `min` from now.
    /// Must never shorten an already pending postponement.
    fn postpone_sleep(&mut self, min: Duration);

    /// Allow the capacitive touch peripheral to wake the device.
    fn enable_touch_wake(&mut self) -> Result<(), Self::Error>;

    /// Wake the device when any pin in `mask` (bit N = GPIO N) is high.
    fn enable_high_level_wake(&mut self, mask: u64) -> Result<(), Self::Error>;

    /// Wake the device when the single given pin is low.
    fn enable_low_level_wake(&mut self, pin: u8) -> Result<(), Self::Error>;
}

/// A no-op controller for boards without a managed sleep path (or for tests).
/// Wake requests are accepted and dropped.
pub struct DummyPower;

impl PowerControl for DummyPower {
    type Error = core::convert::Infallible;

    fn postpone_sleep(&mut self, _min: Duration) {}

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

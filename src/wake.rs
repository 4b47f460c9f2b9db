//! Wake-request aggregation.
//!
//! Each input states its wake intent during the setup pass; the platform
//! supports only three wake primitives, so the per-input requests are reduced
//! into one [`WakeRequests`] value and applied to the power controller in a
//! single shot. After that pass the aggregate is read-only.

use crate::power::PowerControl;

/// The reduced wake configuration across all registered inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeRequests {
    touch: bool,
    high_mask: u64,
    low_pin: Option<u8>,
}

impl WakeRequests {
    pub const fn new() -> Self {
        Self {
            touch: false,
            high_mask: 0,
            low_pin: None,
        }
    }

    /// Forget all collected requests, ahead of a (re-)setup pass.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Note that at least one touch input wants to wake the device.
    pub fn request_touch(&mut self) {
        self.touch = true;
    }

    /// Add `pin` to the set of pins that wake the device when driven high.
    pub fn request_high_level(&mut self, pin: u8) {
        self.high_mask |= 1u64 << pin;
    }

    /// Claim the single low-level wake slot for `pin`.
    ///
    /// The platform has exactly one such slot. The first claim wins; later
    /// claims are dropped with a warning and the device simply cannot be
    /// woken by those pins.
    pub fn request_low_level(&mut self, pin: u8) {
        if let Some(owner) = self.low_pin {
            warn!(
                "low-level wake already claimed by pin {}, dropping request for pin {}",
                owner, pin
            );
            return;
        }
        self.low_pin = Some(pin);
    }

    pub fn touch(&self) -> bool {
        self.touch
    }

    pub fn high_mask(&self) -> u64 {
        self.high_mask
    }

    pub fn low_pin(&self) -> Option<u8> {
        self.low_pin
    }

    /// Program the platform wake primitives from the collected requests.
    ///
    /// The three primitives are independent and may all be active at once.
    /// An enable failure costs that wake path and nothing else.
    pub fn apply<P: PowerControl>(&self, power: &mut P) {
        if self.touch {
            info!("enabling wake on touch");
            if power.enable_touch_wake().is_err() {
                error!("failed to enable touch wakeup");
            }
        }
        if self.high_mask != 0 {
            info!("enabling wake on high level, mask {:x}", self.high_mask);
            if power.enable_high_level_wake(self.high_mask).is_err() {
                error!("failed to enable high-level wakeup");
            }
        }
        if let Some(pin) = self.low_pin {
            info!("enabling wake on low level, pin {}", pin);
            if power.enable_low_level_wake(pin).is_err() {
                error!("failed to enable low-level wakeup");
            }
        }
    }
}

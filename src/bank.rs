//! The input bank: owns the configured inputs and drives them.

use embassy_time::{Instant, Timer};
use embedded_hal::digital::InputPin;

use crate::input::{Input, TouchSensor};
use crate::power::PowerControl;
use crate::wake::WakeRequests;

/// Polling cadence of [`InputBank::run`]. Encoders need a tight cycle to
/// catch every quadrature edge.
const POLL_INTERVAL_MS: u64 = 1;

/// An ordered, fixed bank of inputs plus the platform power controller.
///
/// The bank is single-threaded and cooperative: [`setup`](InputBank::setup)
/// runs once, then [`poll`](InputBank::poll) samples every input per cycle
/// and returns promptly. Inputs are polled in registration order; the order
/// is only observable during setup, where the first registered input wins a
/// contended low-level wake slot.
pub struct InputBank<'a, In: InputPin, T: TouchSensor, P: PowerControl, const N: usize> {
    inputs: [Input<'a, In, T>; N],
    power: P,
    wake: WakeRequests,
}

impl<'a, In: InputPin, T: TouchSensor, P: PowerControl, const N: usize> InputBank<'a, In, T, P, N> {
    /// Build a bank from its inputs, in registration order. The set cannot
    /// change afterwards.
    pub fn new(inputs: [Input<'a, In, T>; N], power: P) -> Self {
        Self {
            inputs,
            power,
            wake: WakeRequests::new(),
        }
    }

    /// One-time setup pass: collect every input's wake intent, then program
    /// the platform wake primitives from the aggregate in a single shot.
    /// The aggregate is not written again after this returns.
    pub fn setup(&mut self) {
        self.wake.clear();
        for input in &mut self.inputs {
            input.setup(&mut self.wake);
        }
        self.wake.apply(&mut self.power);
    }

    /// Sample and evaluate every input once, against a single clock reading.
    pub fn poll(&mut self) {
        let now = Instant::now();
        for input in &mut self.inputs {
            input.poll(now, &mut self.power);
        }
    }

    /// Drive [`poll`](InputBank::poll) forever on a fixed tick, for use as
    /// an embassy task. Callers that have their own main loop can call
    /// `poll` directly instead.
    pub async fn run(&mut self) {
        loop {
            self.poll();
            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    }

    /// The wake configuration collected by the last [`setup`](InputBank::setup).
    pub fn wake_requests(&self) -> &WakeRequests {
        &self.wake
    }

    /// The registered inputs, in registration order.
    pub fn inputs(&self) -> &[Input<'a, In, T>; N] {
        &self.inputs
    }

    /// The registered inputs, e.g. for attaching callbacks after
    /// construction.
    pub fn inputs_mut(&mut self) -> &mut [Input<'a, In, T>; N] {
        &mut self.inputs
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    pub fn power_mut(&mut self) -> &mut P {
        &mut self.power
    }
}

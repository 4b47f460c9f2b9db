use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use drowse::input::touch::{TouchSensor, NO_SIGNAL};
use drowse::power::PowerControl;
use embassy_time::Duration;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// A power controller that records everything asked of it.
#[derive(Default)]
pub struct FakePower {
    pub postponed: Vec<u64>,
    pub touch_wake: bool,
    pub high_mask: Option<u64>,
    pub low_pin: Option<u8>,
    /// Make every wake-enable call report failure.
    pub fail_all: bool,
}

impl PowerControl for FakePower {
    type Error = ();

    fn postpone_sleep(&mut self, min: Duration) {
        self.postponed.push(min.as_millis());
    }

    fn enable_touch_wake(&mut self) -> Result<(), ()> {
        self.touch_wake = true;
        if self.fail_all { Err(()) } else { Ok(()) }
    }

    fn enable_high_level_wake(&mut self, mask: u64) -> Result<(), ()> {
        self.high_mask = Some(mask);
        if self.fail_all { Err(()) } else { Ok(()) }
    }

    fn enable_low_level_wake(&mut self, pin: u8) -> Result<(), ()> {
        self.low_pin = Some(pin);
        if self.fail_all { Err(()) } else { Ok(()) }
    }
}

/// A touch channel that replays a fixed list of readings, then goes quiet.
/// The handle returned by [`ScriptedTouch::new`] observes interrupt arming
/// from outside the bank.
pub struct ScriptedTouch {
    readings: VecDeque<u16>,
    armed: Rc<Cell<Option<u16>>>,
}

impl ScriptedTouch {
    pub fn new(readings: &[u16]) -> (Self, Rc<Cell<Option<u16>>>) {
        let armed = Rc::new(Cell::new(None));
        (
            Self {
                readings: readings.iter().copied().collect(),
                armed: armed.clone(),
            },
            armed,
        )
    }
}

impl TouchSensor for ScriptedTouch {
    fn read(&mut self) -> u16 {
        self.readings.pop_front().unwrap_or(NO_SIGNAL)
    }

    fn arm_wakeup(&mut self, threshold: u16) {
        self.armed.set(Some(threshold));
    }
}

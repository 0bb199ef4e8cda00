//! Time source for queue transitions

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock. Clones share the same instant, so a test can keep a handle
/// after giving one to the engine.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

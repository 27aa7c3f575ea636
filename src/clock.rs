use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Time source that ignores any gameplay time scale (pause, slow motion).
/// All message durations are measured against it.
pub trait UnscaledClock {
    /// Seconds since an arbitrary, fixed epoch. Never decreases.
    fn now(&self) -> f32;
}

/// Wall clock backed by a monotonic `Instant`.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UnscaledClock for SystemClock {
    fn now(&self) -> f32 {
        self.epoch.elapsed().as_secs_f32()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// caller can keep one handle while the scheduler owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: f32) {
        self.now.set(self.now.get() + dt.max(0.0));
    }

    pub fn set(&self, now: f32) {
        self.now.set(now);
    }
}

impl UnscaledClock for ManualClock {
    fn now(&self) -> f32 {
        self.now.get()
    }
}

/// Fires every `interval` seconds of accumulated delta time. The first poll fires immediately.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: f32,
    timer: f32,
    primed: bool,
}

impl Ticker {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            timer: 0.0,
            primed: true,
        }
    }

    /// Adds `dt` and reports whether the cadence is due on this call.
    pub fn poll(&mut self, dt: f32) -> bool {
        if self.primed {
            self.primed = false;
            return true;
        }
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            return true;
        }
        false
    }
}

//! Overlay message scheduler.
//!
//! Keeps a bounded set of on-screen text messages in flight, each with its
//! own fade-in / hold / fade-out timeline, and renders them once per frame
//! into one string per display region.

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod constants;
pub mod preset;
pub mod reset;
pub mod scheduler;
pub mod sink;
pub mod slot;
pub mod state;
pub mod store;

pub use clock::{ManualClock, SystemClock, Ticker, UnscaledClock};
pub use config::{ConfigError, Defaults, MessageConfig, Rgb};
pub use preset::{Flavor, Preset};
pub use reset::ResetSignal;
pub use scheduler::{MessageScheduler, SchedulerOptions};
pub use sink::{SinkSet, TextSink, VisibilitySink};
pub use slot::Slot;
pub use state::{Animation, MessageState, Mode, Persistence, Region};
pub use store::SlotStore;

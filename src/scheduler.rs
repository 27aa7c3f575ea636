use crate::aggregate::Aggregator;
use crate::clock::{Ticker, UnscaledClock};
use crate::config::{Defaults, MessageConfig};
use crate::constants::*;
use crate::preset::Preset;
use crate::reset::ResetSignal;
use crate::sink::SinkSet;
use crate::slot::Slot;
use crate::state::{Mode, Persistence, Region};
use crate::store::SlotStore;

/// Tunables for a scheduler instance.
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    pub defaults: Defaults,
    pub compaction_interval: f32,
    pub headroom: usize,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            compaction_interval: COMPACTION_INTERVAL,
            headroom: SLOT_HEADROOM,
        }
    }
}

/// Owns every message slot and drives them once per frame.
///
/// Call [`tick`](Self::tick) once per frame: it advances each slot's
/// lifecycle, writes every region to its sink and, on its own slower
/// cadence, compacts the slot store. Ids returned by `create` are plain
/// handles; operations on an expired id do nothing.
///
/// A raised [`ResetSignal`] is applied before whatever the scheduler is
/// asked to do next, so messages created after the signal are never caught
/// by it and ids it released read as invalid straight away.
pub struct MessageScheduler {
    store: SlotStore,
    aggregator: Aggregator,
    sinks: SinkSet,
    clock: Box<dyn UnscaledClock>,
    compaction: Ticker,
    reset: ResetSignal,
    defaults: Defaults,
    last_tick: f32,
}

impl MessageScheduler {
    pub fn new(sinks: SinkSet, clock: impl UnscaledClock + 'static) -> Self {
        Self::with_options(sinks, clock, SchedulerOptions::default())
    }

    pub fn with_options(mut sinks: SinkSet, clock: impl UnscaledClock + 'static, options: SchedulerOptions) -> Self {
        for region in sinks.missing() {
            tracing::warn!(region = region.name(), "no output sink bound, messages for this region will not render");
        }
        if sinks.has_container() {
            sinks.set_container_visible(false);
        } else {
            tracing::warn!("no container sink bound, box visibility will not be reported");
        }

        let last_tick = clock.now();
        Self {
            store: SlotStore::with_headroom(options.headroom),
            aggregator: Aggregator::new(),
            sinks,
            clock: Box::new(clock),
            compaction: Ticker::new(options.compaction_interval),
            reset: ResetSignal::new(),
            defaults: options.defaults,
            last_tick,
        }
    }

    /// Handle for the scene loader to signal a reset.
    pub fn reset_signal(&self) -> ResetSignal {
        self.reset.clone()
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: Defaults) {
        self.defaults = defaults;
    }

    /// Allocates a message in the `Ready` state. It does not render until shown.
    pub fn create(&mut self, text: &str, region: Region, mode: Mode, config: &MessageConfig) -> usize {
        self.sync_reset();
        self.store.create(text, region, mode, config)
    }

    pub fn create_preset(&mut self, preset: &Preset) -> usize {
        self.sync_reset();
        let config = preset.to_config(&self.defaults);
        self.store.create(&preset.text, preset.region(), preset.mode(), &config)
    }

    /// Creates the message and starts it right away.
    pub fn show_preset(&mut self, preset: &Preset) -> usize {
        let id = self.create_preset(preset);
        self.show(id);
        id
    }

    /// Starts (or restarts) the entrance animation.
    pub fn show(&mut self, id: usize) {
        self.sync_reset();
        let now = self.clock.now();
        if let Some(slot) = self.store.get_mut(id) {
            slot.show(now);
        }
    }

    /// Like `show`, but leaves a message that is already playing alone.
    pub fn show_if_idle(&mut self, id: usize) {
        self.sync_reset();
        let now = self.clock.now();
        if let Some(slot) = self.store.get_mut(id) {
            if !slot.is_playing() {
                slot.show(now);
            }
        }
    }

    /// Starts the exit animation of a playing message.
    pub fn exit(&mut self, id: usize) {
        self.sync_reset();
        if let Some(slot) = self.store.get_mut(id) {
            slot.exit();
        }
    }

    /// Deactivates every message.
    pub fn clear(&mut self) {
        self.reset.take();
        self.store.clear();
    }

    pub fn check_id(&self, id: usize) -> bool {
        self.message(id).is_some()
    }

    pub fn message(&self, id: usize) -> Option<&Slot> {
        self.store.get(id).filter(|slot| self.survives_pending_reset(slot))
    }

    pub fn store(&mut self) -> &SlotStore {
        self.sync_reset();
        &self.store
    }

    pub fn box_visible(&self) -> bool {
        self.aggregator.box_visible()
    }

    /// Deactivates every message not marked to survive a scene reset.
    pub fn apply_reset(&mut self) {
        let released = self.store.apply_reset();
        tracing::debug!(released, "scene reset");
    }

    /// Trims unused slots off the end of the store.
    pub fn compact(&mut self) -> usize {
        self.sync_reset();
        self.store.compact()
    }

    /// One frame of work.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let dt = (now - self.last_tick).max(0.0);
        self.last_tick = now;

        self.sync_reset();

        for slot in self.store.iter_mut() {
            slot.update(dt, now);
        }
        self.aggregator.flush(&self.store, &mut self.sinks);

        if self.compaction.poll(dt) {
            self.store.compact();
        }
    }

    fn sync_reset(&mut self) {
        if self.reset.take() {
            self.apply_reset();
        }
    }

    /// Read-only view of a reset that has been raised but not yet applied.
    fn survives_pending_reset(&self, slot: &Slot) -> bool {
        !self.reset.is_pending() || slot.config().persistence == Persistence::SurviveReset
    }
}

use crate::config::MessageConfig;
use crate::constants::*;
use crate::slot::Slot;
use crate::state::{Mode, Persistence, Region};

/// Growable, index-addressed collection of message slots.
///
/// Ids are plain indices. A deactivated slot is reused by the next `create`
/// (first fit), and `compact` only ever trims deactivated slots off the tail,
/// so an activated id is never moved or renumbered.
#[derive(Debug)]
pub struct SlotStore {
    slots: Vec<Slot>,
    headroom: usize,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::with_headroom(SLOT_HEADROOM)
    }

    pub fn with_headroom(headroom: usize) -> Self {
        Self {
            slots: Vec::new(),
            headroom,
        }
    }

    /// Allocates a slot for a new message and returns its id.
    pub fn create(&mut self, text: &str, region: Region, mode: Mode, config: &MessageConfig) -> usize {
        let free = self.slots.iter().position(|slot| !slot.activated);
        let id = free.unwrap_or(self.slots.len());
        let slot = Slot::new(id, text.to_string(), region, mode, config.clone());

        match free {
            Some(id) => self.slots[id] = slot,
            None => self.slots.push(slot),
        }
        tracing::debug!(id, region = region.name(), reused = free.is_some(), "message created");
        id
    }

    /// True if `id` refers to an activated slot.
    pub fn check_id(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(|slot| slot.activated)
    }

    pub fn get(&self, id: usize) -> Option<&Slot> {
        self.slots.get(id).filter(|slot| slot.activated)
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Slot> {
        self.slots.get_mut(id).filter(|slot| slot.activated)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Number of slots, activated or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.activated).count()
    }

    /// Drops the run of deactivated slots at the end of the store and
    /// resizes the backing storage to the remaining length plus headroom.
    /// Returns the number of slots removed.
    pub fn compact(&mut self) -> usize {
        let keep = self
            .slots
            .iter()
            .rposition(|slot| slot.activated)
            .map_or(0, |last| last + 1);
        let removed = self.slots.len() - keep;

        self.slots.truncate(keep);
        self.slots.shrink_to(keep + self.headroom);
        self.slots.reserve_exact(self.headroom);

        if removed > 0 {
            tracing::debug!(removed, remaining = keep, "compacted message slots");
        }
        removed
    }

    /// Deactivates every slot.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.activated = false;
        }
    }

    /// Scene reset: deactivates every slot that is not marked to survive it,
    /// whatever state its animation is in. Returns how many were deactivated.
    pub fn apply_reset(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut() {
            if slot.activated && slot.config().persistence != Persistence::SurviveReset {
                slot.activated = false;
                released += 1;
            }
        }
        released
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

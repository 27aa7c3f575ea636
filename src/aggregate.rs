use crate::sink::SinkSet;
use crate::state::Region;
use crate::store::SlotStore;

/// Builds the per-region output from every playing message and pushes it to the sinks.
#[derive(Debug, Default)]
pub struct Aggregator {
    box_visible: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last visibility sent to the box container.
    pub fn box_visible(&self) -> bool {
        self.box_visible
    }

    /// Renders all regions and writes each one, empty or not, so stale
    /// text is cleared. The container flag is only sent when it changes.
    pub fn flush(&mut self, store: &SlotStore, sinks: &mut SinkSet) {
        let regions = render_regions(store);
        for region in Region::ALL {
            sinks.write(region, &regions[region.index()]);
        }

        let box_visible = !regions[Region::Box.index()].is_empty();
        if box_visible != self.box_visible {
            self.box_visible = box_visible;
            sinks.set_container_visible(box_visible);
        }
    }
}

/// Text for every region, indexed by `Region::index`, in slot order.
pub fn render_regions(store: &SlotStore) -> [String; 6] {
    let mut regions: [String; 6] = Default::default();
    for slot in store.iter() {
        if let Some(markup) = slot.markup() {
            regions[slot.region().index()].push_str(&markup);
        }
    }
    regions
}

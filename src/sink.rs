use crate::state::Region;

/// Receives the rendered text of one region, once per tick.
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

/// Receives the visibility of the text box container when it changes.
pub trait VisibilitySink {
    fn set_visible(&mut self, visible: bool);
}

impl<F: FnMut(&str)> TextSink for F {
    fn set_text(&mut self, text: &str) {
        self(text)
    }
}

impl<F: FnMut(bool)> VisibilitySink for F {
    fn set_visible(&mut self, visible: bool) {
        self(visible)
    }
}

/// Output handles for every region plus the box container, bound up front.
/// A region without a sink still animates its messages, it just never renders.
#[derive(Default)]
pub struct SinkSet {
    regions: [Option<Box<dyn TextSink>>; 6],
    container: Option<Box<dyn VisibilitySink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, region: Region, sink: impl TextSink + 'static) -> Self {
        self.regions[region.index()] = Some(Box::new(sink));
        self
    }

    pub fn bind_container(mut self, sink: impl VisibilitySink + 'static) -> Self {
        self.container = Some(Box::new(sink));
        self
    }

    pub fn is_bound(&self, region: Region) -> bool {
        self.regions[region.index()].is_some()
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Regions with no sink bound.
    pub fn missing(&self) -> Vec<Region> {
        Region::ALL.into_iter().filter(|r| !self.is_bound(*r)).collect()
    }

    pub(crate) fn write(&mut self, region: Region, text: &str) {
        if let Some(sink) = self.regions[region.index()].as_mut() {
            sink.set_text(text);
        }
    }

    pub(crate) fn set_container_visible(&mut self, visible: bool) {
        if let Some(sink) = self.container.as_mut() {
            sink.set_visible(visible);
        }
    }
}

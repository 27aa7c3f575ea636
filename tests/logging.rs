//! Warnings the scheduler logs about its output wiring.

use std::io;
use std::sync::{Arc, Mutex};

use hud_messages::{ManualClock, MessageScheduler, Preset, Region, SinkSet};

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_warnings(f: impl FnOnce()) -> Vec<String> {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.lines()
}

#[test]
fn warns_once_per_unbound_region() {
    let lines = with_captured_warnings(|| {
        let clock = ManualClock::new();
        let sinks = SinkSet::new()
            .bind(Region::Box, |_: &str| {})
            .bind(Region::Center, |_: &str| {})
            .bind_container(|_: bool| {});
        let mut scheduler = MessageScheduler::new(sinks, clock.clone());

        scheduler.show_preset(&Preset::memo_top_left("memo"));
        for _ in 0..10 {
            clock.advance(0.1);
            scheduler.tick();
        }
    });

    let missing: Vec<&String> = lines.iter().filter(|line| line.contains("no output sink bound")).collect();
    assert_eq!(missing.len(), 4, "{lines:#?}");
    for region in [Region::Top, Region::Bottom, Region::TopLeft, Region::BottomRight] {
        let field = format!("region=\"{}\"", region.name());
        assert_eq!(missing.iter().filter(|line| line.contains(&field)).count(), 1, "{region:?}");
    }
    for region in [Region::Box, Region::Center] {
        let field = format!("region=\"{}\"", region.name());
        assert!(!missing.iter().any(|line| line.contains(&field)), "{region:?}");
    }
    assert!(lines.iter().all(|line| line.contains("WARN")));
    assert!(!lines.iter().any(|line| line.contains("container")));
}

#[test]
fn warns_when_container_is_unbound() {
    let lines = with_captured_warnings(|| {
        let mut sinks = SinkSet::new();
        for region in Region::ALL {
            sinks = sinks.bind(region, |_: &str| {});
        }
        let mut scheduler = MessageScheduler::new(sinks, ManualClock::new());
        scheduler.tick();
        scheduler.tick();
    });

    assert_eq!(lines.len(), 1, "{lines:#?}");
    assert!(lines[0].contains("no container sink bound"));
}

#[test]
fn fully_bound_scheduler_is_quiet() {
    let lines = with_captured_warnings(|| {
        let mut sinks = SinkSet::new();
        for region in Region::ALL {
            sinks = sinks.bind(region, |_: &str| {});
        }
        let mut scheduler = MessageScheduler::new(sinks.bind_container(|_: bool| {}), ManualClock::new());
        scheduler.show_preset(&Preset::alert("hi"));
        scheduler.tick();
    });
    assert!(lines.is_empty(), "{lines:#?}");
}

//! Canned message flavors.
//!
//! Each flavor fixes the region, the entrance/exit animation and the mode.
//! Timings that are not given fall back to the scheduler's [`Defaults`].

use crate::config::{Defaults, MessageConfig, Rgb};
use crate::state::{Animation, Mode, Persistence, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Alert,
    SubtitleTop,
    SubtitleBottom,
    SubtitleTopTimer,
    SubtitleBottomTimer,
    MemoTopLeft,
    MemoBottomRight,
}

impl Flavor {
    pub fn region(self) -> Region {
        match self {
            Flavor::Alert => Region::Center,
            Flavor::SubtitleTop | Flavor::SubtitleTopTimer => Region::Top,
            Flavor::SubtitleBottom | Flavor::SubtitleBottomTimer => Region::Bottom,
            Flavor::MemoTopLeft => Region::TopLeft,
            Flavor::MemoBottomRight => Region::BottomRight,
        }
    }

    pub fn animation(self) -> Animation {
        match self {
            Flavor::Alert | Flavor::MemoTopLeft | Flavor::MemoBottomRight => Animation::Fade,
            _ => Animation::Instant,
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Flavor::SubtitleTop | Flavor::SubtitleBottom => Mode::Normal,
            _ => Mode::Timer,
        }
    }
}

/// A message request built from a flavor. Unset timings are filled in from
/// [`Defaults`] when the request is turned into a config.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub flavor: Flavor,
    pub text: String,
    entrance: Option<f32>,
    hold: Option<f32>,
    exit: Option<f32>,
    color: Rgb,
    persistence: Persistence,
}

impl Preset {
    pub fn new(flavor: Flavor, text: impl Into<String>) -> Self {
        Self {
            flavor,
            text: text.into(),
            entrance: None,
            hold: None,
            exit: None,
            color: Rgb::default(),
            persistence: Persistence::Transient,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(Flavor::Alert, text)
    }

    pub fn subtitle_top(text: impl Into<String>) -> Self {
        Self::new(Flavor::SubtitleTop, text)
    }

    pub fn subtitle_bottom(text: impl Into<String>) -> Self {
        Self::new(Flavor::SubtitleBottom, text)
    }

    pub fn subtitle_top_timer(text: impl Into<String>) -> Self {
        Self::new(Flavor::SubtitleTopTimer, text)
    }

    pub fn subtitle_bottom_timer(text: impl Into<String>) -> Self {
        Self::new(Flavor::SubtitleBottomTimer, text)
    }

    pub fn memo_top_left(text: impl Into<String>) -> Self {
        Self::new(Flavor::MemoTopLeft, text)
    }

    pub fn memo_bottom_right(text: impl Into<String>) -> Self {
        Self::new(Flavor::MemoBottomRight, text)
    }

    pub fn entrance(mut self, seconds: f32) -> Self {
        self.entrance = Some(seconds);
        self
    }

    pub fn hold(mut self, seconds: f32) -> Self {
        self.hold = Some(seconds);
        self
    }

    pub fn exit(mut self, seconds: f32) -> Self {
        self.exit = Some(seconds);
        self
    }

    pub fn timing(self, entrance: f32, hold: f32, exit: f32) -> Self {
        self.entrance(entrance).hold(hold).exit(exit)
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Keeps the slot after the message ends; `survive_reset` also keeps it across resets.
    pub fn keep_id(self, survive_reset: bool) -> Self {
        self.persistence(Persistence::kept(survive_reset))
    }

    pub fn region(&self) -> Region {
        self.flavor.region()
    }

    pub fn mode(&self) -> Mode {
        self.flavor.mode()
    }

    pub fn to_config(&self, defaults: &Defaults) -> MessageConfig {
        let animation = self.flavor.animation();
        MessageConfig {
            entrance: animation,
            exit: animation,
            entrance_duration: self.entrance.unwrap_or(defaults.entrance),
            hold_duration: self.hold.unwrap_or(defaults.hold),
            exit_duration: self.exit.unwrap_or(defaults.exit),
            color: self.color,
            persistence: self.persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_table() {
        let table = [
            (Flavor::Alert, Region::Center, Animation::Fade, Mode::Timer),
            (Flavor::SubtitleTop, Region::Top, Animation::Instant, Mode::Normal),
            (Flavor::SubtitleBottom, Region::Bottom, Animation::Instant, Mode::Normal),
            (Flavor::SubtitleTopTimer, Region::Top, Animation::Instant, Mode::Timer),
            (Flavor::SubtitleBottomTimer, Region::Bottom, Animation::Instant, Mode::Timer),
            (Flavor::MemoTopLeft, Region::TopLeft, Animation::Fade, Mode::Timer),
            (Flavor::MemoBottomRight, Region::BottomRight, Animation::Fade, Mode::Timer),
        ];
        for (flavor, region, animation, mode) in table {
            assert_eq!(flavor.region(), region, "{flavor:?}");
            assert_eq!(flavor.animation(), animation, "{flavor:?}");
            assert_eq!(flavor.mode(), mode, "{flavor:?}");
        }
    }

    #[test]
    fn omitted_timings_come_from_defaults() {
        let defaults = Defaults {
            entrance: 0.5,
            hold: 4.0,
            exit: 0.25,
        };
        let config = Preset::alert("hello").hold(1.5).to_config(&defaults);
        assert_eq!(config.entrance, Animation::Fade);
        assert_eq!(config.exit, Animation::Fade);
        assert_eq!(config.entrance_duration, 0.5);
        assert_eq!(config.hold_duration, 1.5);
        assert_eq!(config.exit_duration, 0.25);
        assert_eq!(config.persistence, Persistence::Transient);
    }

    #[test]
    fn keep_id_sets_persistence() {
        let defaults = Defaults::default();
        let kept = Preset::memo_top_left("m").keep_id(false).to_config(&defaults);
        let survivor = Preset::memo_top_left("m").keep_id(true).to_config(&defaults);
        assert_eq!(kept.persistence, Persistence::KeepSlotAcrossReset);
        assert_eq!(survivor.persistence, Persistence::SurviveReset);
    }

    #[test]
    fn explicit_timing_overrides_all() {
        let config = Preset::subtitle_bottom_timer("s")
            .timing(0.1, 0.2, 0.3)
            .color(Rgb::WHITE)
            .to_config(&Defaults::default());
        assert_eq!(
            (config.entrance_duration, config.hold_duration, config.exit_duration),
            (0.1, 0.2, 0.3)
        );
        assert_eq!(config.color, Rgb::WHITE);
        assert_eq!(config.entrance, Animation::Instant);
    }
}

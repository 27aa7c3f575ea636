use crate::config::MessageConfig;
use crate::constants::*;
use crate::state::{Animation, MessageState, Mode, Persistence, Region};

/// Outcome of a single state step.
enum Step {
    Settled,  // Nothing more to do this tick
    Continue, // Transition took no time, the next state may run right away
}

/// One allocated message record. Its `id` is its index in the store and stays
/// valid for as long as the slot is activated.
#[derive(Debug, Clone)]
pub struct Slot {
    id: usize,

    pub(crate) activated: bool,
    playing: bool,
    state: MessageState,

    opacity: f32,
    start_time: f32,

    mode: Mode,
    region: Region,
    text: String,
    config: MessageConfig,
}

impl Slot {
    pub(crate) fn new(id: usize, text: String, region: Region, mode: Mode, config: MessageConfig) -> Self {
        Self {
            id,
            activated: true,
            playing: false,
            state: MessageState::Ready,
            opacity: MIN_OPACITY,
            start_time: 0.0,
            mode,
            region,
            text,
            config,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> MessageState {
        self.state
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    /// Restarts the entrance animation from fully transparent.
    pub(crate) fn show(&mut self, now: f32) {
        self.playing = true;
        self.opacity = MIN_OPACITY;
        self.start_time = now;
        self.transition(MessageState::Starting);
    }

    /// Begins the exit animation. Ignored unless the message is playing.
    pub(crate) fn exit(&mut self) {
        if self.playing {
            self.transition(MessageState::Ending);
        }
    }

    /// Advances the lifecycle by one tick. Transitions that take no time are
    /// chained within the same call, so an instant message can go from
    /// Showing to Ready in a single tick.
    pub(crate) fn update(&mut self, dt: f32, now: f32) {
        if !self.activated {
            return;
        }
        loop {
            let before = self.state;
            match self.step(dt, now) {
                Step::Continue if self.state != before => {}
                _ => break,
            }
        }
    }

    fn step(&mut self, dt: f32, now: f32) -> Step {
        match self.state {
            MessageState::Ready => Step::Settled,

            MessageState::Starting => match self.config.entrance {
                Animation::Instant => {
                    self.opacity = MAX_OPACITY;
                    self.transition(MessageState::Showing);
                    Step::Continue
                }
                Animation::Fade => {
                    if is_instant(self.config.entrance_duration) {
                        self.opacity = MAX_OPACITY;
                        self.transition(MessageState::Showing);
                        return Step::Continue;
                    }
                    self.opacity += (MAX_OPACITY / self.config.entrance_duration) * dt;
                    if self.opacity >= MAX_OPACITY {
                        self.opacity = MAX_OPACITY;
                        self.transition(MessageState::Showing);
                    }
                    Step::Settled
                }
            },

            MessageState::Showing => match self.mode {
                Mode::Normal => Step::Settled,
                Mode::Timer => {
                    if now - self.start_time > self.config.hold_duration {
                        self.exit();
                        Step::Continue
                    } else {
                        Step::Settled
                    }
                }
            },

            MessageState::Ending => match self.config.exit {
                Animation::Instant => {
                    self.finish();
                    Step::Continue
                }
                Animation::Fade => {
                    if is_instant(self.config.exit_duration) {
                        self.finish();
                        return Step::Continue;
                    }
                    self.opacity -= (MAX_OPACITY / self.config.exit_duration) * dt;
                    if self.opacity <= MIN_OPACITY {
                        self.finish();
                        // Done never waits for another tick
                        return Step::Continue;
                    }
                    Step::Settled
                }
            },

            MessageState::Done => {
                self.activated = self.config.persistence != Persistence::Transient;
                self.transition(MessageState::Ready);
                Step::Settled
            }
        }
    }

    fn finish(&mut self) {
        self.opacity = MIN_OPACITY;
        self.playing = false;
        self.transition(MessageState::Done);
    }

    fn transition(&mut self, next: MessageState) {
        tracing::trace!(id = self.id, from = ?self.state, to = ?next, "message state");
        self.state = next;
    }

    /// Color markup for this message, or `None` if it is not currently on screen.
    /// Alpha is the truncated opacity as two uppercase hex digits.
    pub fn markup(&self) -> Option<String> {
        if !self.activated || !self.playing {
            return None;
        }
        let alpha = self.opacity.clamp(MIN_OPACITY, MAX_OPACITY) as u8;
        Some(format!("<color=#{}{:02X}>{}</color>\n", self.config.color, alpha, self.text))
    }
}

/// A fade with no positive duration (zero, negative or NaN) completes at once.
fn is_instant(duration: f32) -> bool {
    duration.is_nan() || duration <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;

    fn fade_config(entrance: f32, hold: f32, exit: f32) -> MessageConfig {
        MessageConfig {
            entrance: Animation::Fade,
            exit: Animation::Fade,
            entrance_duration: entrance,
            hold_duration: hold,
            exit_duration: exit,
            ..MessageConfig::default()
        }
    }

    #[test]
    fn new_slot_is_ready_and_invisible() {
        let slot = Slot::new(3, "hi".into(), Region::Center, Mode::Normal, MessageConfig::default());
        assert_eq!(slot.id(), 3);
        assert!(slot.is_activated());
        assert!(!slot.is_playing());
        assert_eq!(slot.state(), MessageState::Ready);
        assert_eq!(slot.opacity(), 0.0);
        assert!(slot.markup().is_none());
    }

    #[test]
    fn ready_slot_does_nothing_on_update() {
        let mut slot = Slot::new(0, "hi".into(), Region::Center, Mode::Timer, MessageConfig::default());
        slot.update(10.0, 100.0);
        assert_eq!(slot.state(), MessageState::Ready);
        assert!(slot.is_activated());
    }

    #[test]
    fn fade_in_reaches_full_opacity_over_duration() {
        let mut slot = Slot::new(0, "hi".into(), Region::Center, Mode::Normal, fade_config(1.0, 0.0, 1.0));
        slot.show(0.0);
        slot.update(0.5, 0.5);
        assert_eq!(slot.state(), MessageState::Starting);
        assert!((slot.opacity() - 127.5).abs() < 1e-3);
        slot.update(0.6, 1.1);
        assert_eq!(slot.state(), MessageState::Showing);
        assert_eq!(slot.opacity(), MAX_OPACITY);
    }

    #[test]
    fn zero_duration_fade_is_instant() {
        let mut slot = Slot::new(0, "hi".into(), Region::Center, Mode::Normal, fade_config(0.0, 0.0, -1.0));
        slot.show(0.0);
        slot.update(0.016, 0.016);
        assert_eq!(slot.state(), MessageState::Showing);
        assert_eq!(slot.opacity(), MAX_OPACITY);

        slot.exit();
        slot.update(0.016, 0.032);
        assert!(!slot.is_playing());
        assert!(!slot.is_activated());
        assert_eq!(slot.state(), MessageState::Ready);
        assert_eq!(slot.opacity(), 0.0);
    }

    #[test]
    fn nan_fade_is_instant() {
        let mut slot = Slot::new(0, "hi".into(), Region::Center, Mode::Normal, fade_config(f32::NAN, 0.0, f32::NAN));
        slot.show(0.0);
        for i in 1..=10 {
            slot.update(0.1, i as f32 * 0.1);
        }
        assert_eq!(slot.state(), MessageState::Showing);
        assert_eq!(slot.opacity(), MAX_OPACITY);

        slot.exit();
        slot.update(0.1, 1.1);
        assert_eq!(slot.state(), MessageState::Ready);
        assert_eq!(slot.opacity(), MIN_OPACITY);
        assert!(!slot.is_playing());
    }

    #[test]
    fn exit_is_ignored_until_playing() {
        let mut slot = Slot::new(0, "hi".into(), Region::Top, Mode::Normal, MessageConfig::default());
        slot.exit();
        assert_eq!(slot.state(), MessageState::Ready);
    }

    #[test]
    fn normal_mode_never_exits_by_itself() {
        let mut slot = Slot::new(0, "hi".into(), Region::Top, Mode::Normal, MessageConfig::default());
        slot.show(0.0);
        slot.update(0.016, 1000.0);
        assert_eq!(slot.state(), MessageState::Showing);
        assert!(slot.is_playing());
    }

    #[test]
    fn fade_out_finishes_and_keeps_slot_when_persistent() {
        let mut config = fade_config(0.0, 0.0, 1.0);
        config.persistence = Persistence::KeepSlotAcrossReset;
        let mut slot = Slot::new(0, "hi".into(), Region::Center, Mode::Normal, config);
        slot.show(0.0);
        slot.update(0.1, 0.1);
        slot.exit();
        slot.update(0.5, 0.6);
        assert_eq!(slot.state(), MessageState::Ending);
        assert!((slot.opacity() - 127.5).abs() < 1e-3);
        slot.update(0.6, 1.2);
        assert_eq!(slot.state(), MessageState::Ready);
        assert!(slot.is_activated());
        assert!(!slot.is_playing());
        assert_eq!(slot.opacity(), 0.0);
    }

    #[test]
    fn markup_carries_color_and_alpha() {
        let config = MessageConfig {
            color: Rgb::new(0xFF, 0x80, 0x00),
            ..fade_config(2.0, 0.0, 0.0)
        };
        let mut slot = Slot::new(0, "alert".into(), Region::Center, Mode::Normal, config);
        slot.show(0.0);
        assert_eq!(slot.markup().as_deref(), Some("<color=#FF800000>alert</color>\n"));
        slot.update(0.1, 0.1);
        // 255 / 2 * 0.1 = 12.75 -> 0x0C
        assert_eq!(slot.markup().as_deref(), Some("<color=#FF80000C>alert</color>\n"));
    }
}

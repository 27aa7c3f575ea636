/// Lifecycle of a single message slot.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MessageState {
    Ready,    // Configured, waiting for show()
    Starting, // Entrance animation running
    Showing,  // Fully visible
    Ending,   // Exit animation running
    Done,     // Exit finished, persistence policy pending
}

/// Display region a message is rendered into. Each region has its own output sink.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Region {
    Box,
    Center,
    Top,
    Bottom,
    TopLeft,
    BottomRight,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Box,
        Region::Center,
        Region::Top,
        Region::Bottom,
        Region::TopLeft,
        Region::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Box => "box",
            Region::Center => "center",
            Region::Top => "top",
            Region::Bottom => "bottom",
            Region::TopLeft => "top_left",
            Region::BottomRight => "bottom_right",
        }
    }
}

/// Entrance or exit animation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Animation {
    #[default]
    Instant,
    Fade,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Mode {
    /// Stays up until exit() is called.
    #[default]
    Normal,
    /// Exits by itself once the hold duration has elapsed.
    Timer,
}

/// What happens to a slot when its message ends or a scene reset arrives.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Persistence {
    /// Slot is released when the message ends and on reset.
    #[default]
    Transient,
    /// Slot survives the end of the message but is released on reset.
    KeepSlotAcrossReset,
    /// Slot survives both the end of the message and resets.
    SurviveReset,
}

impl Persistence {
    /// Maps the "keep id" flag pair used by presets: `true` also survives resets.
    pub fn kept(survive_reset: bool) -> Self {
        if survive_reset {
            Persistence::SurviveReset
        } else {
            Persistence::KeepSlotAcrossReset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_indices_match_all_order() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn kept_flag_maps_to_persistence() {
        assert_eq!(Persistence::kept(true), Persistence::SurviveReset);
        assert_eq!(Persistence::kept(false), Persistence::KeepSlotAcrossReset);
    }
}

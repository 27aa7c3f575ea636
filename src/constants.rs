pub const MAX_OPACITY: f32 = 255.0;           // Fully visible
pub const MIN_OPACITY: f32 = 0.0;             // Fully transparent

pub const DEFAULT_ENTRANCE_DURATION: f32 = 1.0; // Fade-in time used when a preset omits it (seconds)
pub const DEFAULT_HOLD_DURATION: f32 = 3.0;     // Time a timer message stays up (seconds)
pub const DEFAULT_EXIT_DURATION: f32 = 1.0;     // Fade-out time used when a preset omits it (seconds)

pub const COMPACTION_INTERVAL: f32 = 5.0;     // Time between slot compaction passes (seconds)
pub const SLOT_HEADROOM: usize = 2;           // Empty slots kept allocated after compaction

pub const FPS: u32 = 60;                      // Frames per second for the demo loop
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

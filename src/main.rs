use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use tracing_subscriber::filter::EnvFilter;

use hud_messages::constants::*;
use hud_messages::{
    Animation, Defaults, ManualClock, MessageConfig, MessageScheduler, Mode, Preset, Region, Rgb, SinkSet,
};

#[cfg(feature = "window")]
mod window;

/// Plays a scripted sequence of HUD messages and prints what each region shows.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with default entrance / hold / exit durations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Length of the run in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Vary each frame time by up to +/-50% to mimic an uneven frame rate
    #[arg(long)]
    jitter: bool,

    /// Open a window and run in real time instead of printing (needs the `window` feature)
    #[arg(long)]
    window: bool,
}

/// Something the script does at a point in time.
enum Action {
    Alert(&'static str),
    SubtitleBottom(&'static str),
    Memo(&'static str),
    SurvivingMemo(&'static str),
    TopTimer(&'static str, f32),
    BoxText(&'static str),
    ExitBox,
    ReshowSubtitle,
    SceneReset,
}

struct Cue {
    at: f32,
    action: Action,
}

/// Ids the script needs to refer back to.
#[derive(Default)]
struct ScriptIds {
    subtitle: Option<usize>,
    text_box: Option<usize>,
}

fn script() -> Vec<Cue> {
    vec![
        Cue { at: 0.0, action: Action::Alert("STAGE 1") },
        Cue { at: 0.0, action: Action::SubtitleBottom("Press any key to skip") },
        Cue { at: 0.5, action: Action::Memo("Objective updated") },
        Cue { at: 1.0, action: Action::BoxText("Welcome aboard the station.") },
        Cue { at: 3.0, action: Action::ExitBox },
        Cue { at: 3.5, action: Action::TopTimer("Incoming transmission", 1.5) },
        Cue { at: 3.8, action: Action::SurvivingMemo("Checkpoint saved") },
        Cue { at: 4.5, action: Action::SceneReset },
        Cue { at: 5.0, action: Action::ReshowSubtitle },
        Cue { at: 6.0, action: Action::Alert("STAGE 2") },
    ]
}

fn run_cue(scheduler: &mut MessageScheduler, ids: &mut ScriptIds, action: &Action) {
    match action {
        Action::Alert(text) => {
            scheduler.show_preset(&Preset::alert(*text).hold(2.0).color(Rgb::new(0xFF, 0xD7, 0x00)));
        }
        Action::SubtitleBottom(text) => {
            ids.subtitle = Some(scheduler.show_preset(&Preset::subtitle_bottom(*text).keep_id(false)));
        }
        Action::Memo(text) => {
            scheduler.show_preset(&Preset::memo_top_left(*text));
        }
        Action::SurvivingMemo(text) => {
            scheduler.show_preset(&Preset::memo_bottom_right(*text).keep_id(true));
        }
        Action::TopTimer(text, hold) => {
            scheduler.show_preset(&Preset::subtitle_top_timer(*text).hold(*hold));
        }
        Action::BoxText(text) => {
            let config = MessageConfig {
                entrance: Animation::Fade,
                exit: Animation::Fade,
                entrance_duration: 0.5,
                exit_duration: 0.5,
                color: Rgb::WHITE,
                ..MessageConfig::default()
            };
            let id = scheduler.create(text, Region::Box, Mode::Normal, &config);
            scheduler.show(id);
            ids.text_box = Some(id);
        }
        Action::ExitBox => {
            if let Some(id) = ids.text_box {
                scheduler.exit(id);
            }
        }
        Action::ReshowSubtitle => {
            // The reset released this id, so this is a no-op
            if let Some(id) = ids.subtitle {
                scheduler.show_if_idle(id);
            }
        }
        Action::SceneReset => scheduler.reset_signal().raise(),
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Sinks that print a region whenever its text changes.
fn stdout_sinks() -> SinkSet {
    let mut sinks = SinkSet::new();
    for region in Region::ALL {
        let mut previous = String::new();
        sinks = sinks.bind(region, move |text: &str| {
            if text != previous {
                println!("[{}] {:?}", region.name(), text);
                previous = text.to_string();
            }
        });
    }
    sinks.bind_container(|visible: bool| println!("[box container] visible = {}", visible))
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let defaults = match &args.config {
        Some(path) => Defaults::load(path).with_context(|| format!("loading defaults from {}", path.display()))?,
        None => Defaults::default(),
    };
    tracing::info!(entrance = defaults.entrance, hold = defaults.hold, exit = defaults.exit, "message defaults");

    if args.window {
        #[cfg(feature = "window")]
        return window::run(defaults, script());

        #[cfg(not(feature = "window"))]
        tracing::warn!("built without the `window` feature, running offline");
    }

    // --- Offline run on a manual clock ---
    let clock = ManualClock::new();
    let mut scheduler = MessageScheduler::new(stdout_sinks(), clock.clone());
    scheduler.set_defaults(defaults);

    let mut rng = rand::rng();
    let cues = script();
    let mut ids = ScriptIds::default();
    let mut next_cue = 0;
    let mut elapsed = 0.0;

    // --- Main Loop ---
    while elapsed <= args.seconds {
        while next_cue < cues.len() && cues[next_cue].at <= elapsed {
            run_cue(&mut scheduler, &mut ids, &cues[next_cue].action);
            next_cue += 1;
        }

        scheduler.tick();

        let dt = if args.jitter {
            FRAME_TIME * rng.random_range(0.5_f32..1.5)
        } else {
            FRAME_TIME
        };
        clock.advance(dt);
        elapsed += dt;
    }

    let store = scheduler.store();
    tracing::info!(slots = store.len(), active = store.active_count(), "run finished");
    Ok(())
}

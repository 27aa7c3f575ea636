use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use raylib::prelude::*;

use hud_messages::constants::*;
use hud_messages::{Defaults, MessageScheduler, Region, Rgb, SinkSet, SystemClock, UnscaledClock};

use crate::{run_cue, Cue, ScriptIds};

const WINDOW_WIDTH: i32 = 960;
const WINDOW_HEIGHT: i32 = 540;
const FONT_SIZE: i32 = 20;
const LINE_HEIGHT: i32 = 24;

/// Latest text per region, filled by the sinks and read back when drawing.
type Board = Rc<RefCell<[String; 6]>>;

pub fn run(defaults: Defaults, cues: Vec<Cue>) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("HUD Messages")
        .vsync()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let board: Board = Rc::new(RefCell::new(Default::default()));
    let box_visible = Rc::new(Cell::new(false));

    let mut sinks = SinkSet::new();
    for region in Region::ALL {
        let board = board.clone();
        sinks = sinks.bind(region, move |text: &str| board.borrow_mut()[region.index()] = text.to_string());
    }
    let flag = box_visible.clone();
    sinks = sinks.bind_container(move |visible: bool| flag.set(visible));

    let mut scheduler = MessageScheduler::new(sinks, SystemClock::new());
    scheduler.set_defaults(defaults);

    let script_clock = SystemClock::new();
    let mut ids = ScriptIds::default();
    let mut next_cue = 0;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let elapsed = script_clock.now();
        while next_cue < cues.len() && cues[next_cue].at <= elapsed {
            run_cue(&mut scheduler, &mut ids, &cues[next_cue].action);
            next_cue += 1;
        }

        scheduler.tick();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGRAY);

        if box_visible.get() {
            let (x, y) = anchor(Region::Box);
            d.draw_rectangle(x - 10, y - 10, WINDOW_WIDTH - 2 * (x - 10), WINDOW_HEIGHT - y, Color::new(0, 0, 0, 160));
        }

        let board = board.borrow();
        for region in Region::ALL {
            let (x, y) = anchor(region);
            for (row, line) in board[region.index()].lines().enumerate() {
                if let Some((color, text)) = parse_line(line) {
                    d.draw_text(text, x, y + row as i32 * LINE_HEIGHT, FONT_SIZE, color);
                }
            }
        }
    }
    Ok(())
}

/// Top-left corner of each region's text block.
fn anchor(region: Region) -> (i32, i32) {
    match region {
        Region::Box => (60, WINDOW_HEIGHT - 120),
        Region::Center => (WINDOW_WIDTH / 2 - 120, WINDOW_HEIGHT / 2 - 20),
        Region::Top => (WINDOW_WIDTH / 2 - 160, 20),
        Region::Bottom => (WINDOW_WIDTH / 2 - 160, WINDOW_HEIGHT - 160),
        Region::TopLeft => (20, 60),
        Region::BottomRight => (WINDOW_WIDTH - 300, WINDOW_HEIGHT - 40),
    }
}

/// Splits one `<color=#RRGGBBAA>text</color>` line into a draw color and its text.
fn parse_line(line: &str) -> Option<(Color, &str)> {
    let rest = line.strip_prefix("<color=#")?;
    let (hex, rest) = rest.split_at_checked(8)?;
    let text = rest.strip_prefix('>')?.strip_suffix("</color>")?;
    let rgb: Rgb = hex.get(..6)?.parse().ok()?;
    let alpha = u8::from_str_radix(hex.get(6..)?, 16).ok()?;
    Some((Color::new(rgb.r, rgb.g, rgb.b, alpha), text))
}

//! Deflector entry point
//!
//! Runs a headless session in idle/demo mode at a fixed frame time and logs
//! every event until the session asks for its outcome screen.
//!
//! Usage: `deflector [seed] [tuning.json]`

use deflector::consts::*;
use deflector::sim::{ArenaBounds, GameEvent, Session, TickInput};
use deflector::{DeflectorError, Tuning};

/// Give up on a demo that never resolves (ten minutes of frames)
const MAX_FRAMES: u32 = 36_000;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Deflector (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DeflectorError> {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let bounds = ArenaBounds::new(ARENA_WIDTH, ARENA_HEIGHT)?;
    let mut session = Session::with_tuning(bounds, tuning, seed)?;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for frame in 0..MAX_FRAMES {
        session.update(&input, FRAME_DT_MS);
        for event in session.drain_events() {
            println!("frame {:>5}: {:?}", frame, event);
            if let GameEvent::TransitionRequested(scene) = event {
                log::info!("Switching to {:?} after {} frames", scene, frame + 1);
                return Ok(());
            }
        }
    }

    log::warn!("No outcome after {} frames, tearing down", MAX_FRAMES);
    session.dispose();
    Ok(())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

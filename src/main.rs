//! Lockpick headless driver
//!
//! Plays a scripted session against the simulation with virtual audio voices and prints
//! the end-of-game summary. Usage: `lockpick [settings.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Game` directly through the library
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::f32::consts::PI;
    use std::path::PathBuf;

    use lockpick::audio::{Cue, CueBank, VirtualVoice};
    use lockpick::sim::{GameEvent, Viewport};
    use lockpick::{Game, Settings};

    const DT: f32 = 1.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;
    /// Give up aiming and push anyway after this many frames
    const AIM_PATIENCE: u32 = 120;

    pub fn run() {
        lockpick::init_logging();
        log::info!("Lockpick (headless) starting...");

        let mut args = std::env::args().skip(1);
        let settings_path = args.next().map(PathBuf::from);
        let settings = Settings::load_or_default(settings_path.as_deref());
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);

        let mut bank = CueBank::new(&settings.audio);
        let voices: Vec<(Cue, VirtualVoice)> =
            Cue::ALL.iter().map(|cue| (*cue, VirtualVoice::new())).collect();
        for (cue, voice) in &voices {
            bank.insert(*cue, Box::new(voice.clone()));
        }

        let mut game = Game::new(settings, seed, Viewport::new(WIDTH, HEIGHT), bank);
        let mut attempt = 0u32;
        let mut aiming = 0u32;
        let mut holding = false;
        let mut frames = 0u32;

        while frames < MAX_FRAMES && !game.snapshot().game_over {
            frames += 1;

            if game.input().is_active() {
                // Every third attempt deliberately misses the zone
                let miss = attempt % 3 == 2;
                let (x, y) = aim(&game, miss);
                game.input().pointer_move(x, y);

                let state = game.state();
                let aligned = state.lock.contains(state.pick.angle);
                if !holding && (miss || aligned || aiming >= AIM_PATIENCE) {
                    game.input().key_down(" ");
                    holding = true;
                }
                aiming += 1;
            }

            let mut finished = false;
            for event in game.frame(DT) {
                match event {
                    GameEvent::Unlocked { level, points } => {
                        log::info!("Attempt {attempt}: opened {} (+{points})", level.as_str());
                        finished = true;
                    }
                    GameEvent::PickBroke { remaining } => {
                        log::info!("Attempt {attempt}: pick broke, {remaining} left");
                        finished = true;
                    }
                    _ => {}
                }
            }

            if finished {
                game.input().key_up(" ");
                holding = false;
                aiming = 0;
                attempt += 1;
            }
        }

        if !game.snapshot().game_over {
            log::warn!("Stopped after {frames} frames without running out of picks");
        }

        for (cue, voice) in &voices {
            log::debug!("{}: started {} times", cue.name(), voice.state().starts);
        }

        let summary = game.summary();
        println!("Points: {}", summary.points);
        for (label, count) in summary.rows() {
            println!("  {label:<10} {count}");
        }
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => log::debug!("Final snapshot: {json}"),
            Err(e) => log::warn!("Could not serialize snapshot: {e}"),
        }
    }

    /// Pixel on a half circle around the screen center whose pick angle is closest to the
    /// zone's middle, or furthest from it when missing on purpose
    fn aim(game: &Game, miss: bool) -> (f32, f32) {
        let state = game.state();
        let (low, high) = state.lock.zone_bounds();
        let mid = (low + high) * 0.5;
        let radius = HEIGHT * 0.3;

        let mut best = (WIDTH * 0.5, HEIGHT * 0.5);
        let mut best_score = f32::MIN;
        for step in 0..=360 {
            let a = step as f32 / 360.0 * PI;
            let (x, y) = (WIDTH * 0.5 + radius * a.cos(), HEIGHT * 0.5 - radius * a.sin());
            let mut probe = state.pointer.clone();
            probe.sample(x, y);
            let off = (probe.target_angle() - mid).abs();
            let score = if miss { off } else { -off };
            if score > best_score {
                best_score = score;
                best = (x, y);
            }
        }
        best
    }
}

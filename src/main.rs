//! Tile Hopper entry point
//!
//! Native builds run a headless demo: load settings, let the autopilot (or an
//! idle player) drive a seeded session at 60 Hz, and log what happens. The
//! browser build starts from `tile_hopper::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use tile_hopper::consts::SIM_DT;
    use tile_hopper::sim::{GameEvent, TickInput};
    use tile_hopper::{Runner, Settings, autopilot};

    // Read settings before the logger exists so they can pick its level
    let path = std::env::args().nth(1);
    let loaded = path.as_deref().map(|path| Settings::read(Path::new(path)));
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter().as_str()),
    )
    .init();

    match (&path, &loaded) {
        (Some(path), Some(Ok(_))) => log::info!("Loaded settings from {}", path),
        (Some(path), Some(Err(e))) => log::warn!("Using default settings, {} unusable: {}", path, e),
        _ => {}
    }

    log::info!("Tile Hopper (native) starting...");
    let mut runner = Runner::from_settings(&settings);

    let total_ticks = (settings.demo_seconds / SIM_DT).round() as u64;
    let ticks_per_second = (1.0 / SIM_DT).round() as u64;
    for t in 0..total_ticks {
        let input = if settings.autopilot {
            autopilot::drive(&runner.state)
        } else {
            TickInput::default()
        };
        runner.set_input(input);
        runner.frame(SIM_DT);

        for event in runner.drain_events() {
            match event {
                GameEvent::LevelStarted { level } => log::debug!("Level {} started", level),
                _ => log::trace!("Event: {:?}", event),
            }
        }

        if (t + 1) % ticks_per_second == 0 {
            let hud = runner.hud();
            match hud.banner() {
                Some(banner) => log::info!("{}  [{}]", hud.status_line(), banner),
                None => log::info!("{}", hud.status_line()),
            }
        }
    }

    let hud = runner.hud();
    println!("{}", hud.status_line());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is tile_hopper::web::start, this is just to satisfy the compiler
}

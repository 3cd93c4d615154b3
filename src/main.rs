//! Asteboids headless driver
//!
//! Loads `asteboids.json` (defaults when absent), then lets the autopilot fly
//! one session at the configured tick rate. Sounds go to the log. A diagnostic
//! dump is written when requested, and at the end of a debug session.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use asteboids::assets::SpriteSheet;
use asteboids::audio::{AudioManager, Heartbeat, LogSink};
use asteboids::clock::FixedTimestep;
use asteboids::input::TickInput;
use asteboids::sim::{GameEvent, GameState, dump_file_name, tick};
use asteboids::{Result, Settings};

const SETTINGS_FILE: &str = "asteboids.json";
/// Headless sessions self-destruct after this long
const SESSION_LIMIT_SECS: f64 = 120.0;

struct Driver {
    state: GameState,
    audio: AudioManager<LogSink>,
    heartbeat: Heartbeat,
    timestep: FixedTimestep,
}

impl Driver {
    fn new(settings: Settings) -> Result<Self> {
        let timestep = FixedTimestep::new(settings.tick_duration());
        let audio = AudioManager::new(LogSink, settings.muted);
        let state = GameState::new(settings, SpriteSheet::default())?;
        Ok(Self {
            state,
            audio,
            heartbeat: Heartbeat::default(),
            timestep,
        })
    }

    /// Run fixed steps for one frame; returns true once the session is over
    fn frame(&mut self, frame_dt: f64) -> Result<bool> {
        let input = TickInput {
            autopilot: true,
            quit: self.state.elapsed >= SESSION_LIMIT_SECS,
            ..Default::default()
        };

        for _ in 0..self.timestep.advance(frame_dt) {
            tick(&mut self.state, &input, self.timestep.step());
            if self.handle_events()? {
                return Ok(true);
            }
        }

        if let Some(beat) = self.heartbeat.advance(frame_dt) {
            self.audio.play(beat);
        }
        Ok(false)
    }

    fn handle_events(&mut self) -> Result<bool> {
        let mut over = false;
        for event in self.state.take_events() {
            match event {
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::MuteToggled(muted) => self.audio.set_muted(muted),
                GameEvent::DumpRequested => self.write_dump()?,
                GameEvent::GameOver { won, score } => {
                    log::info!("{} with score {}", if won { "Won" } else { "Lost" }, score);
                    over = true;
                }
                GameEvent::Restarted => {}
            }
        }
        Ok(over)
    }

    fn write_dump(&self) -> Result<()> {
        let name = dump_file_name(self.state.clock);
        let mut out = BufWriter::new(File::create(&name)?);
        self.state.dump(&mut out)?;
        log::info!("Wrote {} entities to {}", self.state.registry.len(), name);
        Ok(())
    }
}

fn run() -> Result<()> {
    // Installed before settings load; back to info afterwards unless debug or RUST_LOG
    let explicit = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    let settings = Settings::load_or_default(SETTINGS_FILE)?;
    if !explicit && !settings.debug {
        log::set_max_level(log::LevelFilter::Info);
    }
    log::info!(
        "Asteboids starting: {}x{} at {} tps",
        settings.screen_width,
        settings.screen_height,
        settings.max_tps
    );

    let debug = settings.debug;
    let mut driver = Driver::new(settings)?;
    let frame = Duration::from_secs_f64(driver.timestep.step());
    let mut last = Instant::now();

    loop {
        std::thread::sleep(frame);
        let now = Instant::now();
        let frame_dt = now.duration_since(last).as_secs_f64();
        last = now;

        if driver.frame(frame_dt)? {
            break;
        }
    }

    let state = &driver.state;
    log::info!(
        "Session over: score {}, {} kills, {:.1}s survived (best {})",
        state.score(),
        state.kills,
        state.elapsed,
        state.high_score
    );
    if debug {
        driver.write_dump()?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("asteboids: {}", e);
        std::process::exit(1);
    }
}

//! Grove Arena entry point
//!
//! Terminal host: reads settings, owns the terminal, feeds keyboard intents
//! into the simulation and draws every frame.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write, stderr, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use grove_arena::platform::{FrameClock, KeyboardIntents};
use grove_arena::renderer::{TerminalCanvas, draw_world};
use grove_arena::settings::CONFIG_ENV;
use grove_arena::sim::{World, tick};
use grove_arena::ui::{HudSnapshot, SessionSummary, format_elapsed};
use grove_arena::{HostError, Settings};

/// Environment variable naming the log file used while stderr is a terminal
const LOG_ENV: &str = "GROVE_ARENA_LOG";

/// Darkening applied over the arena once the run has ended
const GAME_OVER_DIM: f32 = 0.6;

/// What the player asked for from the keyboard this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Restart,
}

/// One run of the game plus its host-side state
struct Game {
    settings: Settings,
    world: World,
    canvas: TerminalCanvas,
    keys: KeyboardIntents,
    clock: FrameClock,
    started: Instant,
    frame: u64,
    summary_logged: bool,
}

impl Game {
    fn new(settings: Settings, cols: u16, rows: u16) -> Self {
        let seed = settings.seed_or(time_seed());
        let arena = settings.arena();
        log::info!(
            "Starting session with seed {} in a {}x{} arena",
            seed,
            arena.width,
            arena.height
        );
        Self {
            world: World::new(arena, seed),
            canvas: TerminalCanvas::new(cols, rows, &arena),
            keys: KeyboardIntents::new(),
            clock: FrameClock::default(),
            started: Instant::now(),
            frame: 0,
            summary_logged: false,
            settings,
        }
    }

    /// Fresh world with a new seed, keeping the terminal layout
    fn restart(&mut self) {
        let seed = self.settings.seed_or(time_seed());
        log::info!("Restarting with seed {}", seed);
        self.world = World::new(self.settings.arena(), seed);
        self.keys = KeyboardIntents::new();
        self.summary_logged = false;
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), HostError> {
        check_terminal_size(&self.settings, cols, rows)?;
        self.canvas = TerminalCanvas::new(cols, rows, &self.world.arena);
        Ok(())
    }

    /// Apply one input event; returns a host command if the key asks for one
    fn handle_event(&mut self, event: Event) -> Result<Option<Command>, HostError> {
        match event {
            Event::Key(key) => Ok(self.handle_key(&key)),
            Event::Resize(cols, rows) => {
                self.resize(cols, rows)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Some(Command::Quit);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Command::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if self.world.is_over() => {
                    return Some(Command::Restart);
                }
                _ => {}
            }
        }
        self.keys.handle(key, self.frame);
        None
    }

    /// Advance and draw one frame
    fn step<W: Write>(&mut self, out: &mut W) -> Result<(), HostError> {
        let dt = self.clock.delta(self.started.elapsed().as_secs_f64());
        let input = self.keys.snapshot(self.frame);
        tick(&mut self.world, &input, dt);

        draw_world(&self.world, &mut self.canvas);
        let banner = if self.world.is_over() {
            self.log_summary();
            self.canvas.dim(GAME_OVER_DIM);
            Some(format!(
                "Game over\nYou survived {}\nR to play again, Q to quit",
                format_elapsed(self.world.elapsed)
            ))
        } else {
            None
        };

        let hud = HudSnapshot::from_world(&self.world);
        self.canvas.present(out, &hud, banner.as_deref())?;
        Ok(())
    }

    fn log_summary(&mut self) {
        if self.summary_logged {
            return;
        }
        self.summary_logged = true;
        let summary = SessionSummary::from_world(&self.world);
        match serde_json::to_string(&summary) {
            Ok(json) => log::info!("Session summary: {}", json),
            Err(e) => log::warn!("Could not serialize session summary: {}", e),
        }
    }
}

/// Seed from the wall clock for sessions without a configured seed
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn check_terminal_size(settings: &Settings, cols: u16, rows: u16) -> Result<(), HostError> {
    if cols < settings.min_cols || rows < settings.min_rows {
        return Err(HostError::TerminalTooSmall {
            cols,
            rows,
            min_cols: settings.min_cols,
            min_rows: settings.min_rows,
        });
    }
    Ok(())
}

/// Settings path from the first argument, then the environment
fn settings_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut game: Game,
) -> Result<(), HostError> {
    let frame_time = Duration::from_secs_f64(1.0 / game.settings.target_fps as f64);

    loop {
        let frame_start = Instant::now();
        game.frame += 1;

        while let Ok(event) = rx.try_recv() {
            match game.handle_event(event)? {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Restart) => game.restart(),
                None => {}
            }
        }

        game.step(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn start() -> Result<(), HostError> {
    let settings = Settings::load_or_default(settings_path().as_deref())?;
    let (cols, rows) = terminal::size()?;
    check_terminal_size(&settings, cols, rows)?;
    let game = Game::new(settings, cols, rows);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events where the terminal supports them; others fall back to
    // the hold window in KeyboardIntents
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, game);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Where log lines go: `None` keeps stderr
///
/// The frame owns the terminal, so a stderr that is the same TTY would tear
/// it apart. In that case logs go to `$GROVE_ARENA_LOG` or a temp file.
fn log_file_path(stderr_is_terminal: bool, configured: Option<OsString>) -> Option<PathBuf> {
    if !stderr_is_terminal {
        return None;
    }
    Some(
        configured
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("grove-arena.log")),
    )
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file_path(stderr().is_terminal(), std::env::var_os(LOG_ENV)) {
        match File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("grove-arena: cannot open log file {}: {e}", path.display());
                builder.target(env_logger::Target::Pipe(Box::new(std::io::sink())));
            }
        }
    }
    builder.init();
}

fn main() {
    init_logging();
    log::info!("Grove Arena starting...");

    if let Err(e) = start() {
        log::error!("{}", e);
        eprintln!("grove-arena: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirected_stderr_keeps_logs() {
        assert_eq!(log_file_path(false, Some("x.log".into())), None);
    }

    #[test]
    fn test_terminal_stderr_logs_to_file() {
        assert_eq!(
            log_file_path(true, Some("/tmp/arena.log".into())),
            Some(PathBuf::from("/tmp/arena.log"))
        );
        let default = log_file_path(true, None).expect("falls back to a temp file");
        assert!(default.ends_with("grove-arena.log"));
    }

    #[test]
    fn test_terminal_size_floor() {
        let settings = Settings::default();
        assert!(check_terminal_size(&settings, 80, 24).is_ok());
        assert!(matches!(
            check_terminal_size(&settings, 40, 24),
            Err(HostError::TerminalTooSmall { cols: 40, .. })
        ));
    }
}

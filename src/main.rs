mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use damsel_rescue::config::GameConfig;
use damsel_rescue::entities::Sprite;
use damsel_rescue::error::AppError;
use damsel_rescue::game::Game;
use damsel_rescue::input::command_for;

use display::SpriteSheet;

/// Environment variable naming the log file; the terminal itself is the
/// game screen, so logs never go to stdout/stderr.
const LOG_ENV_VAR: &str = "DAMSEL_RESCUE_LOG";

/// Longest time step fed to the simulation, in seconds.  A stalled terminal
/// must not fling enemies across the board in one frame.
const MAX_DT: f32 = 0.25;

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: apply every pending key press immediately, advance the game by
/// the wall-clock time since the previous frame, draw, then sleep out the
/// rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<ThreadRng>,
    sheet: &SpriteSheet,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> std::io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            if is_quit(code, modifiers) {
                info!("quit_requested");
                return Ok(());
            }
            if let Some(command) = command_for(code) {
                game.handle(command);
            }
        }

        let dt = frame_start
            .duration_since(last_frame)
            .as_secs_f32()
            .min(MAX_DT);
        last_frame = frame_start;

        game.frame(dt);

        let size = terminal::size()?;
        display::render(out, &game.screen(), sheet, size)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    if let Err(err) = run_app() {
        error!(error = %err, "startup_failed");
        eprintln!("damsel_rescue: {err}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<(), AppError> {
    init_tracing()?;
    info!("=== Damsel Rescue startup ===");

    let config = GameConfig::from_env()?;

    let sheet = SpriteSheet::load(&Sprite::ALL);
    let Some(mut game) = sheet.on_ready(move || Game::new(config, thread_rng())) else {
        return Ok(());
    };
    let frame = game.config().frame_duration();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut game, &sheet, &rx, frame);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let stats = game.stats();
    info!(
        rounds = stats.rounds,
        successes = stats.successes,
        failures = stats.failures,
        "session_over"
    );
    result.map_err(AppError::from)
}

fn init_tracing() -> Result<(), AppError> {
    let Some(path) = std::env::var_os(LOG_ENV_VAR).map(PathBuf::from) else {
        return Ok(());
    };
    let file = File::create(&path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use term_arcade::games::chase::ChaseGame;
use term_arcade::games::runner::RunnerGame;
use term_arcade::games::snake::SnakeGame;
use term_arcade::session::{Control, Dir, Game, Phase, Session};
use term_arcade::store::{FileStore, ScoreStore};

const RUNNER_KEY: &str = "runnerHighScore";
const SNAKE_KEY: &str = "snakeHighScore";
const CHASE_KEY: &str = "chaseHighScore";

const DEFAULT_FPS: u64 = 60;

/// Frame cadence, overridable via `ARCADE_FPS` (bad values fall back).
fn frame_time() -> Duration {
    let fps = std::env::var("ARCADE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_FPS);
    Duration::from_micros(1_000_000 / fps)
}

/// Decode a key into a game control. Unrecognized keys map to `None` and
/// are dropped silently.
fn key_to_control(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Control::Dir(Dir::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Control::Dir(Dir::Down)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Control::Dir(Dir::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Control::Dir(Dir::Right))
        }
        KeyCode::Char(' ') => Some(Control::Action),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum GameChoice {
    Runner,
    Snake,
    Chase,
}

enum MenuResult {
    Play(GameChoice),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &FileStore,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  TERMINAL  ARCADE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a game:"))?;

    let options: &[(&str, &str, &str, &str)] = &[
        ("1", "Runner", RUNNER_KEY, "Jump the oncoming blocks"),
        ("2", "Snake ", SNAKE_KEY, "Eat, grow, don't bite yourself"),
        ("3", "Chase ", CHASE_KEY, "Clear the maze, dodge the ghosts"),
    ];

    for (i, (key, label, score_key, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("— {:<32}", desc)))?;
        if let Some(best) = store.get(score_key) {
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(format!("best {:>5}", best)))?;
        }
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("1-3 : Play   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Play(GameChoice::Runner)),
                KeyCode::Char('2') => return Ok(MenuResult::Play(GameChoice::Snake)),
                KeyCode::Char('3') => return Ok(MenuResult::Play(GameChoice::Chase)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive one session until the player leaves. Returns `true` → quit the
/// program, `false` → back to the menu.
///
/// The loop runs at a fixed frame cadence and feeds measured wall-clock
/// `dt` into the session, which decides whether a simulation step is due
/// (the snake throttles itself; the other two step every frame). Frames
/// where nothing stepped and no input arrived skip rendering entirely.
fn game_loop<W, G>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut session: Session<G, FileStore>,
    render: impl Fn(&mut W, &Session<G, FileStore>) -> std::io::Result<()>,
) -> std::io::Result<bool>
where
    W: Write,
    G: Game,
{
    let mut rng = thread_rng();
    let frame = frame_time();
    let mut dirty = true;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain pending input (non-blocking) ────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if !matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                _ => {
                    if let Some(control) = key_to_control(code) {
                        // Any mapped key starts / restarts; the same key
                        // also seeds the new run's first input, so the
                        // arrow that starts the snake steers it too.
                        if session.phase() != Phase::Running {
                            session.start(&mut rng);
                            dirty = true;
                        }
                        session.buffer_input(control);
                    }
                }
            }
        }

        // ── Advance the simulation ────────────────────────────────────────────
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        if session.advance(dt, &mut rng) {
            dirty = true;
        }

        if dirty {
            render(out, &session)?;
            dirty = false;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them; others
    // fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        // Reopened each lap so the menu reflects scores from the last run.
        let store = FileStore::open();
        match show_menu(out, rx, &store)? {
            MenuResult::Quit => return Ok(()),
            MenuResult::Play(choice) => {
                let quit = match choice {
                    GameChoice::Runner => game_loop(
                        out,
                        rx,
                        Session::new(RunnerGame::new(), store, RUNNER_KEY),
                        display::runner::render,
                    )?,
                    GameChoice::Snake => game_loop(
                        out,
                        rx,
                        Session::new(SnakeGame::new(&mut thread_rng()), store, SNAKE_KEY),
                        display::snake::render,
                    )?,
                    GameChoice::Chase => game_loop(
                        out,
                        rx,
                        Session::new(ChaseGame::new(), store, CHASE_KEY),
                        display::chase::render,
                    )?,
                };
                if quit {
                    return Ok(());
                }
            }
        }
    }
}

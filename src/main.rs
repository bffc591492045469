mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::Rng;

use juicy_time::catalog::GlyphSet;
use juicy_time::compute::{init_state, press_key, tick};
use juicy_time::config::{GameConfig, GameMode, FPS};
use juicy_time::entities::GameState;
use juicy_time::round::{advance_level, is_final_level, reset};
use juicy_time::screens::{KeyGate, KeyRoute, Screen, Transition, UiAction};

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS);

/// Set to a log filter (e.g. `debug`) to write a log file to the temp dir.
const LOG_ENV: &str = "JUICY_TIME_LOG";

/// Set when the terminal cannot draw the fruit pictures.
const ASCII_ENV: &str = "JUICY_TIME_ASCII";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The alternate screen owns the terminal, so logs go to a file.
fn init_logging() {
    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    let path = std::env::temp_dir().join("juicy_time.log");
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("cannot open {}: {}", path.display(), e),
    }
    let _ = builder.try_init();
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// One drained terminal event, reduced to what the game cares about.
enum Input {
    Char(char),
    Enter,
    Escape,
    Interrupt,
    Click { col: u16, row: u16 },
}

fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Interrupt),
            KeyCode::Char(c) => Some(Input::Char(c)),
            KeyCode::Enter => Some(Input::Enter),
            KeyCode::Esc => Some(Input::Escape),
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Input::Click { col: column, row }),
        _ => None,
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// The current screen plus the game it shows, if one has been started.
struct Session {
    screen: Screen,
    state: Option<GameState>,
}

impl Session {
    /// Carry out a UI action.  Returns `true` when the program should exit.
    fn apply<W: Write>(
        &mut self,
        out: &mut W,
        action: UiAction,
        rng: &mut impl Rng,
    ) -> Result<bool> {
        let next = match self.screen.on_action(action) {
            Transition::Quit => return Ok(true),
            Transition::Stay => return Ok(false),
            Transition::Goto(next) => next,
        };

        match action {
            UiAction::Start(mode) => {
                let state = init_state(GameConfig::for_mode(mode), rng)
                    .with_context(|| format!("cannot start {:?} game", mode))?;
                self.state = Some(state);
            }
            UiAction::Continue => {
                let Some(advanced) = self.state.as_ref().and_then(|s| advance_level(s, rng)) else {
                    warn!("continue pressed with no level to advance to");
                    return Ok(false);
                };
                self.state = Some(advanced);
            }
            UiAction::Restart => {
                self.state = self.state.as_ref().map(|s| reset(s, rng));
            }
            UiAction::BackToMenu | UiAction::Quit => {}
        }
        if matches!(action, UiAction::Start(_) | UiAction::Continue | UiAction::Restart) {
            if let Some(state) = &self.state {
                display::play_cues(out, &state.cues)?;
            }
        }
        info!("screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
        Ok(false)
    }

    /// Move to the modal screen matching the round outcome, if it ended.
    fn follow_round(&mut self) {
        if let Some(state) = &self.state {
            let next = Screen::after_round(state.round.status, is_final_level(state));
            if next != self.screen {
                info!("screen {:?} -> {:?}", self.screen, next);
                self.screen = next;
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One pass per frame: drain input → keystrokes / UI actions → tick → render.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, glyphs: GlyphSet) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = Session {
        screen: Screen::Menu,
        state: None,
    };
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start - last_frame;
        last_frame = frame_start;
        let (width, height) = terminal::size()?;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut gate = KeyGate::default();
        while let Ok(ev) = rx.try_recv() {
            let Some(input) = to_input(ev) else { continue };
            let route = match input {
                Input::Interrupt | Input::Escape => KeyRoute::Action(UiAction::Quit),
                Input::Click { col, row } => display::button_at(session.screen, width, height, col, row)
                    .map_or(KeyRoute::Drop, KeyRoute::Action),
                Input::Char(c) => gate.route(session.screen, c),
                Input::Enter => gate.route_enter(session.screen),
            };
            let action = match (route, input) {
                (KeyRoute::Game, Input::Char(c)) => {
                    if let Some(state) = &session.state {
                        let next = press_key(state, c);
                        display::play_cues(out, &next.cues)?;
                        session.state = Some(next);
                        session.follow_round();
                    }
                    gate.after_game_key(session.screen);
                    None
                }
                (KeyRoute::Action(action), _) => Some(action),
                _ => None,
            };
            if let Some(action) = action {
                if session.apply(out, action, &mut rng)? {
                    return Ok(());
                }
            }
        }

        if session.screen == Screen::Playing {
            if let Some(state) = &session.state {
                let next = tick(state, dt, &mut rng);
                display::play_cues(out, &next.cues)?;
                session.state = Some(next);
                session.follow_round();
            }
        }

        display::render(out, session.screen, session.state.as_ref(), glyphs, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    for mode in [GameMode::Classic, GameMode::Typing, GameMode::Falling] {
        GameConfig::for_mode(mode)
            .validate()
            .with_context(|| format!("invalid {:?} configuration", mode))?;
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let glyphs = if std::env::var_os(ASCII_ENV).is_some() {
        GlyphSet::Placeholder
    } else {
        GlyphSet::Pictures
    };
    info!("drawing fruit with {:?}", glyphs);

    let result = run(&mut out, &rx, glyphs);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

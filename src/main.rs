//! Terminal match-3 runner (default binary).
//!
//! `tui-match3` plays in the terminal. `tui-match3 script [--seed N] ...`
//! runs the headless line protocol on stdin/stdout instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use tui_match3::config::AppConfig;
use tui_match3::core::{
    PickOutcome, Resolution, ResolutionEvent, Session, SessionSnapshot, SimpleRng,
};
use tui_match3::event_log::{EventLog, LogEvent};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::script::{parse_script_args, run_script};
use tui_match3::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use tui_match3::types::{GameAction, CLEAR_PAUSE_MS, HINT_FLASH_MS, SETTLE_PAUSE_MS, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let app = AppConfig::from_env();

    if let Some(config) = parse_script_args(&args, &app)? {
        let mut session = Session::new(config.engine, config.seed)?;
        let mut log = EventLog::open_optional(app.log_path.as_deref());
        let stdin = io::stdin();
        return run_script(&mut session, stdin.lock(), io::stdout().lock(), &mut log);
    }
    if let Some(arg) = args.first() {
        return Err(anyhow!(
            "unknown argument: {} (usage: tui-match3 [script [--seed N] [--size N] [--kinds N] [--min-run N]])",
            arg
        ));
    }

    let session = Session::new(app.engine, app.seed)?;
    let log = EventLog::open_optional(app.log_path.as_deref());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut game = Game::new(session, log, &app);
    let result = game.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// What the loop does after handling a key
enum Flow {
    Continue,
    Quit,
}

struct Game {
    session: Session<SimpleRng>,
    log: EventLog,
    view: GameView,
    cursor: Cursor,
    overlay: Overlay,
    snap: SessionSnapshot,
    fb: FrameBuffer,
    time_limit: Duration,
    deadline: Instant,
    hint_until: Option<Instant>,
}

impl Game {
    fn new(session: Session<SimpleRng>, log: EventLog, app: &AppConfig) -> Self {
        let time_limit = Duration::from_millis(app.time_limit_ms() as u64);
        let cursor = Cursor::new(session.grid().size());
        let mut game = Self {
            session,
            log,
            view: GameView::default(),
            cursor,
            overlay: Overlay::default(),
            snap: SessionSnapshot::default(),
            fb: FrameBuffer::new(0, 0),
            time_limit,
            deadline: Instant::now() + time_limit,
            hint_until: None,
        };
        game.update_message();
        game.log_session_start();
        game
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let tick = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        loop {
            self.session.snapshot_into(&mut self.snap);
            self.draw(term)?;

            let timeout = tick
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Flow::Quit = self.on_key(key, term)? {
                            return Ok(());
                        }
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                self.tick();
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, term: &mut TerminalRenderer) -> Result<Flow> {
        if should_quit(key) {
            return Ok(Flow::Quit);
        }
        let Some(action) = handle_key_event(key) else {
            return Ok(Flow::Continue);
        };

        match action {
            GameAction::CursorUp
            | GameAction::CursorDown
            | GameAction::CursorLeft
            | GameAction::CursorRight => {
                self.cursor.apply(action);
            }
            GameAction::Pick => {
                let outcome = self.session.pick(self.cursor.position());
                if let PickOutcome::Swapped { from, to, outcome: swap } = &outcome {
                    self.log.record(
                        self.session.episode_id(),
                        LogEvent::Swap {
                            from: *from,
                            to: *to,
                            outcome: swap,
                        },
                    );
                }
                if outcome.needs_resolve() {
                    self.overlay.hint = None;
                    self.hint_until = None;
                    return self.play_resolution(term);
                }
            }
            GameAction::Hint => {
                if self.session.is_expired() {
                    return Ok(Flow::Continue);
                }
                let hint = self.session.hint();
                self.log
                    .record(self.session.episode_id(), LogEvent::Hint { hint });
                self.overlay.hint = hint;
                self.hint_until = hint.map(|_| Instant::now() + ms(HINT_FLASH_MS));
            }
            GameAction::Restart => {
                self.session.restart();
                self.deadline = Instant::now() + self.time_limit;
                self.overlay.hint = None;
                self.hint_until = None;
                self.update_message();
                self.log_session_start();
            }
        }
        Ok(Flow::Continue)
    }

    /// Step the resolution of an accepted swap, drawing every wave. The
    /// countdown keeps running but expiry waits for the episode to end.
    fn play_resolution(&mut self, term: &mut TerminalRenderer) -> Result<Flow> {
        self.session.snapshot_into(&mut self.snap);
        let episode_id = self.session.episode_id();

        let mut resolution: Resolution<'_, SimpleRng> = self.session.resolve();
        while let Some(event) = resolution.advance() {
            self.snap
                .update_board(resolution.grid(), resolution.ledger());
            let pause = match &event {
                ResolutionEvent::Cleared { .. } => CLEAR_PAUSE_MS,
                ResolutionEvent::Settled(step) => {
                    self.log.record(
                        episode_id,
                        LogEvent::Wave {
                            chain_index: step.chain_index,
                            matched: &step.matched,
                            score_gained: step.score_gained,
                            total_score: step.total_score,
                        },
                    );
                    SETTLE_PAUSE_MS
                }
            };

            self.overlay.time_left_ms = time_left_ms(self.deadline);
            draw_frame(
                &self.view,
                &self.snap,
                &self.overlay,
                &mut self.fb,
                term,
            )?;
            if let Flow::Quit = wait(ms(pause), term)? {
                return Ok(Flow::Quit);
            }
        }
        drop(resolution);

        self.update_message();
        Ok(Flow::Continue)
    }

    fn tick(&mut self) {
        let now = Instant::now();
        self.overlay.time_left_ms = time_left_ms(self.deadline);
        if self.hint_until.is_some_and(|until| now >= until) {
            self.hint_until = None;
            self.overlay.hint = None;
        }

        if !self.session.is_expired() && self.overlay.time_left_ms == 0 {
            self.session.expire();
            self.log.record(
                self.session.episode_id(),
                LogEvent::Expired {
                    score: self.session.score(),
                    best_chain: self.session.ledger().best_chain(),
                },
            );
        }
    }

    fn draw(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        self.overlay.cursor = if self.session.is_expired() {
            None
        } else {
            Some(self.cursor.position())
        };
        self.overlay.time_left_ms = time_left_ms(self.deadline);
        draw_frame(&self.view, &self.snap, &self.overlay, &mut self.fb, term)
    }

    fn update_message(&mut self) {
        self.overlay.message = if self.session.is_stuck() {
            Some("NO MOVES")
        } else {
            None
        };
    }

    fn log_session_start(&mut self) {
        self.log.record(
            self.session.episode_id(),
            LogEvent::SessionStart {
                seed: self.session.seed(),
                config: self.session.config(),
                grid: self.session.grid(),
            },
        );
    }
}

fn draw_frame(
    view: &GameView,
    snap: &SessionSnapshot,
    overlay: &Overlay,
    fb: &mut FrameBuffer,
    term: &mut TerminalRenderer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_into(snap, overlay, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}

/// Sleep for `duration` while still answering quit and resize events.
fn wait(duration: Duration, term: &mut TerminalRenderer) -> Result<Flow> {
    let until = Instant::now() + duration;
    loop {
        let left = until.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Ok(Flow::Continue);
        }
        if event::poll(left)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(key) => {
                    return Ok(Flow::Quit);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}

fn time_left_ms(deadline: Instant) -> u32 {
    let left = deadline.saturating_duration_since(Instant::now()).as_millis();
    u32::try_from(left).unwrap_or(u32::MAX)
}

fn ms(n: u32) -> Duration {
    Duration::from_millis(n as u64)
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the chord trainer.
//!
//! Provides a ratatui-based terminal interface with the progression row,
//! the multiple-choice panel with its countdown, and help and cheatsheet
//! overlays. Input handling and timer events go through [`AppState`], which
//! needs no terminal and is what the tests drive.

mod cheatsheet;
mod progression;
mod quiz;

pub use cheatsheet::CheatsheetWidget;
pub use progression::ProgressionWidget;
pub use quiz::{countdown_ratio, QuizWidget};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, warn};

use crate::error::TrainerError;
use crate::quiz::{Outcome, TimerToken, Trainer};
use crate::timing::{Countdown, TimerEvent};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Input poll timeout between frames
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Presentation-only state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Help text visible
    pub show_help: bool,
    /// Cheatsheet visible
    pub show_cheatsheet: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
    /// Last countdown report and the question it was for
    pub countdown: Option<(TimerToken, Duration)>,
}

impl UiState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Choose option (0-based)
    Answer(usize),
    /// Generate a new progression
    NewProgression,
    /// Select the next key
    NextKey,
    /// Select the previous key
    PreviousKey,
    /// Show or hide the resolved chords
    ToggleReveal,
    /// Toggle cheatsheet
    ToggleCheatsheet,
    /// Toggle help
    ToggleHelp,
    /// Close any open overlay
    CloseOverlay,
}

/// Map a key press to an action
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (code, modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        // Options 1-4
        (KeyCode::Char(c @ '1'..='4'), KeyModifiers::NONE) => {
            KeyAction::Answer((c as usize) - ('1' as usize))
        }

        // Progression and key
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NewProgression,
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::NextKey,
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::PreviousKey,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::ToggleReveal,

        // Overlays
        (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::ToggleCheatsheet,
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            KeyAction::ToggleHelp
        }
        (KeyCode::Esc, _) => KeyAction::CloseOverlay,

        _ => KeyAction::None,
    }
}

/// Trainer plus presentation state
#[derive(Debug)]
pub struct AppState<R: Rng = StdRng> {
    /// Drill state
    pub trainer: Trainer<R>,
    /// Overlays and status line
    pub ui: UiState,
}

impl<R: Rng> AppState<R> {
    /// Wrap a trainer
    pub fn new(trainer: Trainer<R>) -> Self {
        Self {
            trainer,
            ui: UiState::default(),
        }
    }

    /// Apply a key action; returns false when the app should quit
    pub fn apply(&mut self, action: KeyAction, now: Instant) -> bool {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => return false,
            KeyAction::Answer(option) => {
                if let Some(outcome) = self.trainer.answer(option, now) {
                    self.report(outcome);
                }
            }
            KeyAction::NewProgression => {
                let result = self.trainer.new_progression(now);
                self.check(result);
            }
            KeyAction::NextKey => {
                let result = self.trainer.next_key(now);
                self.check(result);
                self.ui.set_status(format!("Key: {}", self.trainer.key()));
            }
            KeyAction::PreviousKey => {
                let result = self.trainer.previous_key(now);
                self.check(result);
                self.ui.set_status(format!("Key: {}", self.trainer.key()));
            }
            KeyAction::ToggleReveal => self.trainer.toggle_reveal(),
            KeyAction::ToggleCheatsheet => {
                self.ui.show_cheatsheet = !self.ui.show_cheatsheet;
                self.ui.show_help = false;
            }
            KeyAction::ToggleHelp => {
                self.ui.show_help = !self.ui.show_help;
                self.ui.show_cheatsheet = false;
            }
            KeyAction::CloseOverlay => {
                self.ui.show_help = false;
                self.ui.show_cheatsheet = false;
            }
        }
        true
    }

    /// Apply a countdown event. Ticks for anything but the current
    /// question are dropped, and the session rejects stale expiries.
    pub fn on_timer(&mut self, event: TimerEvent, now: Instant) {
        match event {
            TimerEvent::Tick { token, remaining } => {
                if self.trainer.timer_token() == Some(token) {
                    self.ui.countdown = Some((token, remaining));
                }
            }
            TimerEvent::Expired { token } => {
                if let Some(outcome) = self.trainer.expire(token, now) {
                    self.report(outcome);
                }
            }
        }
    }

    /// Time left on the current question as last reported by the countdown.
    ///
    /// A question with no report yet shows its full limit.
    pub fn countdown_remaining(&self) -> Option<Duration> {
        let token = self.trainer.timer_token()?;
        match self.ui.countdown {
            Some((reported, remaining)) if reported == token => Some(remaining),
            _ => self.trainer.time_limit(),
        }
    }

    fn report(&mut self, outcome: Outcome) {
        let message = match outcome {
            Outcome::Correct => "Correct!".to_string(),
            Outcome::Incorrect { expected } => format!("Wrong, it was {}", expected),
            Outcome::TimedOut { expected } => format!("Time's up, it was {}", expected),
        };
        self.ui.set_status(message);
    }

    fn check(&mut self, result: Result<(), TrainerError>) {
        if let Err(e) = result {
            warn!(error = %e, "trainer update failed");
            self.ui.set_status(format!("unavailable: {}", e));
        }
    }
}

/// Terminal UI application
pub struct App {
    /// Trainer and UI state
    state: AppState,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Countdown for the current question
    countdown: Countdown,
    /// Countdown events
    timer_events: UnboundedReceiver<TimerEvent>,
    /// Countdown refresh interval
    tick: Duration,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Create a new app around `trainer`.
    ///
    /// Must be called inside a tokio runtime context, since the countdown
    /// spawns its task there.
    pub fn new(trainer: Trainer, tick: Duration) -> io::Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let terminal = restore_on_err(enter_screen())?;

        let (sender, timer_events) = unbounded_channel();
        let mut app = Self {
            state: AppState::new(trainer),
            terminal,
            countdown: Countdown::new(sender),
            timer_events,
            tick,
            running: true,
        };
        app.sync_countdown();
        Ok(app)
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Run until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        while self.running {
            self.state.ui.clear_expired_status();
            self.draw()?;

            if let Some(Event::Key(key)) = self.poll_event()? {
                if key.kind == KeyEventKind::Press {
                    let action = map_key(key.code, key.modifiers);
                    debug!(?action, "key");
                    if !self.state.apply(action, Instant::now()) {
                        self.quit();
                    }
                }
            }

            while let Ok(event) = self.timer_events.try_recv() {
                self.state.on_timer(event, Instant::now());
            }
            self.sync_countdown();
        }
        self.countdown.cancel();
        Ok(())
    }

    /// Poll for events with timeout
    fn poll_event(&self) -> io::Result<Option<Event>> {
        if event::poll(FRAME_INTERVAL)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn sync_countdown(&mut self) {
        let trainer = &self.state.trainer;
        self.countdown
            .sync(trainer.timer_token(), trainer.time_limit(), self.tick);
    }

    /// Draw the UI
    fn draw(&mut self) -> io::Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| render(frame, state))?;
        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo raw mode and the alternate screen when setup fails part way, since
/// no `App` exists yet to do it on drop
fn restore_on_err<T>(result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    result
}

/// Draw one frame of the trainer
pub fn render<R: Rng>(frame: &mut Frame, state: &AppState<R>) {
    let area = frame.area();

    // Main layout: header, progression, quiz, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(4),  // Progression
            Constraint::Min(9),     // Quiz
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], state);

    let session = state.trainer.session();
    frame.render_widget(
        ProgressionWidget::new(session)
            .revealed(state.trainer.revealed())
            .block(Block::default().borders(Borders::ALL).title(" Progression ")),
        chunks[1],
    );
    frame.render_widget(
        QuizWidget::new(session)
            .remaining(state.countdown_remaining())
            .block(Block::default().borders(Borders::ALL).title(" Quiz ")),
        chunks[2],
    );

    render_status_bar(frame, chunks[3], &state.ui);

    if state.ui.show_cheatsheet {
        let overlay = centered(area, 60, 11);
        frame.render_widget(Clear, overlay);
        frame.render_widget(
            CheatsheetWidget::new(state.trainer.key()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Cheatsheet ")
                    .style(Style::default().bg(Color::Black)),
            ),
            overlay,
        );
    } else if state.ui.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the header line
fn render_header<R: Rng>(frame: &mut Frame, area: Rect, state: &AppState<R>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Nashville Trainer ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = state.trainer.session().score();
    let tally = state.trainer.tally();
    let timer = match state.trainer.time_limit() {
        Some(limit) => format!("{}s per chord", limit.as_secs()),
        None => "untimed".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!("Key: {}", state.trainer.key()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("Score: {}/{}", score.correct, score.answered),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("Total: {}/{}", tally.correct, tally.answered),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  │  "),
        Span::styled(timer, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " 1-4: Answer | n: New | ←/→: Key | r: Reveal | c: Cheatsheet | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 44, 15);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Quiz", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  1-4         Choose an option"),
        Line::from("  n           New progression"),
        Line::from("  r           Reveal chords"),
        Line::from(""),
        Line::from(Span::styled("Key", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Left/Right  Previous/next key"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  c           Cheatsheet"),
        Line::from("  h/?         Toggle help"),
        Line::from("  Esc         Close overlay"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

/// Rectangle of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

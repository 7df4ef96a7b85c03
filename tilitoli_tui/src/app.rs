//! Application wiring and the terminal event loop.

use crate::input::KeyboardAdapter;
use crate::renderer::Renderer;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tilitoli::{Board, EventBus, PuzzleConfig, RandomDirections};
use tracing::{debug, info, instrument};

/// How long to wait for input before checking timers again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// A running puzzle session: the bus and everything listening on it.
pub struct App {
    board: Rc<Board>,
    renderer: Rc<Renderer>,
    keyboard: KeyboardAdapter,
    directions: RandomDirections<StdRng>,
    shuffle_delay: Duration,
    auto_shuffle: bool,
    shuffle_at: Option<Instant>,
}

impl App {
    /// Wires the board, renderer and keyboard adapter onto a fresh bus.
    #[instrument(skip(config), fields(size = *config.size()))]
    pub fn new(config: &PuzzleConfig, seed: Option<u64>, auto_shuffle: bool) -> Result<Self> {
        let bus = EventBus::new();
        let board = Board::subscribe(Board::from_config(bus.clone(), config)?);
        let renderer = Rc::new(Renderer::new(*config.display_size()));
        bus.subscribe(renderer.clone());
        let keyboard = KeyboardAdapter::new(bus);

        let directions = match seed {
            Some(seed) => RandomDirections::seeded(seed),
            None => RandomDirections::from_entropy(),
        };

        Ok(Self {
            board,
            renderer,
            keyboard,
            directions,
            shuffle_delay: Duration::from_millis(*config.shuffle_delay_ms()),
            auto_shuffle,
            shuffle_at: None,
        })
    }

    /// Lays out a fresh board and schedules the shuffle.
    #[instrument(skip(self))]
    pub fn start(&mut self, now: Instant) {
        self.board.init();
        self.shuffle_at = self.auto_shuffle.then(|| now + self.shuffle_delay);
    }

    /// Runs any shuffle that has come due.
    pub fn tick(&mut self, now: Instant) {
        if self.shuffle_at.is_some_and(|due| now >= due) {
            self.shuffle_at = None;
            self.shuffle();
        }
    }

    fn shuffle(&mut self) {
        let applied = self.board.shuffle(&mut self.directions);
        debug!(applied = applied.len(), "Shuffle applied");
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> Flow {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('r') => self.start(now),
            KeyCode::Char('s') => {
                self.shuffle_at = None;
                self.shuffle();
            }
            code => {
                self.keyboard.handle_key(code);
            }
        }
        Flow::Continue
    }

    /// The board this session plays on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The renderer's visual model.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// One-line status for the footer.
    pub fn status(&self) -> String {
        if self.shuffle_at.is_some() {
            "Shuffling...".to_string()
        } else if self.board.solved() && self.renderer.view().solved {
            "Solved! r: reset  s: shuffle  q: quit".to_string()
        } else if self.board.solved() {
            "In order. s: shuffle  q: quit".to_string()
        } else {
            "Arrows/hjkl: slide  r: reset  s: shuffle  q: quit".to_string()
        }
    }

    /// Draws and handles input until the player quits.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.start(Instant::now());
        loop {
            terminal.draw(|frame| ui::draw(frame, &self.renderer.view(), &self.status()))?;

            let timeout = self
                .shuffle_at
                .map(|due| due.saturating_duration_since(Instant::now()))
                .map_or(POLL_INTERVAL, |remaining| remaining.min(POLL_INTERVAL));
            if event::poll(timeout)?
                && let TermEvent::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && self.handle_key(key.code, Instant::now()) == Flow::Quit
            {
                info!("Player quit");
                return Ok(());
            }
            self.tick(Instant::now());
        }
    }
}

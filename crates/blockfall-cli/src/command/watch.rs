use std::{path::PathBuf, time::Duration};

use blockfall_agent::{Agent, Weights};
use blockfall_engine::{GameState, Seed};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::Rng as _;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::{
    command::{BOARD_HEIGHT, BOARD_WIDTH},
    model::WeightsModel,
    view::widgets::BoardDisplay,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    /// Path to a trained model file (built-in tuned weights when omitted)
    #[clap(long)]
    model: Option<PathBuf>,
    /// Delay between placements, in milliseconds
    #[clap(long, default_value_t = 100)]
    tick_ms: u64,
    /// Game seed (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

impl Default for WatchArg {
    fn default() -> Self {
        Self {
            model: None,
            tick_ms: 100,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let WatchArg {
        model,
        tick_ms,
        seed,
    } = arg;

    let weights = match model {
        Some(path) => WeightsModel::open(path)?.weights,
        None => Weights::TUNED,
    };
    let seed = Seed(seed.unwrap_or_else(|| rand::rng().random()));
    let state = GameState::with_seed(BOARD_WIDTH, BOARD_HEIGHT, seed)?;
    let app = WatchApp {
        agent: Agent::new(weights),
        state,
        seed,
        tick: Duration::from_millis(*tick_ms),
        paused: false,
    };

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

#[derive(Debug)]
struct WatchApp {
    agent: Agent,
    state: GameState,
    seed: Seed,
    tick: Duration,
    paused: bool,
}

impl WatchApp {
    fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char(' ') => self.paused = !self.paused,
                            _ => {}
                        }
                    }
                }
                continue;
            }
            if !self.paused && !self.state.is_defeated() {
                self.agent.step(&mut self.state);
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [board_area, panel_area] = Layout::horizontal([
            Constraint::Length(u16::try_from(BOARD_WIDTH * 2 + 2).unwrap_or(u16::MAX)),
            Constraint::Min(24),
        ])
        .areas(frame.area());

        let board = BoardDisplay::new(self.state.grid()).block(Block::bordered().title("Board"));
        frame.render_widget(&board, board_area);

        let mut lines = vec![
            Line::from(format!("Seed:   {}", self.seed.0)),
            Line::from(format!("Score:  {}", self.state.score())),
            Line::from(format!("Pieces: {}", self.state.total_pieces())),
            Line::from(format!("Combo:  {}", self.state.combo())),
            Line::from(format!("Next:   {}", self.state.next_piece().as_char())),
            Line::from(format!(
                "Saved:  {}",
                self.state
                    .saved_piece()
                    .map_or('-', blockfall_engine::PieceKind::as_char)
            )),
            Line::from(""),
        ];
        if self.state.is_defeated() {
            lines.push(Line::styled("GAME OVER", Style::new().red().bold()));
        } else if self.paused {
            lines.push(Line::styled("PAUSED", Style::new().yellow()));
        }
        lines.push(Line::from("q: quit  space: pause"));

        let panel = Paragraph::new(lines).block(Block::bordered().title("Agent"));
        frame.render_widget(panel, panel_area);
    }
}

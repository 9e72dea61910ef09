use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use splitline_engine::{Document, SplitResult};

const TICK: Duration = Duration::from_millis(30);
const PALETTE: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Magenta, Color::Green];

/// One visible piece of a split line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// A character wrapper and the index of the word it belongs to
    Char { text: String, word: usize },
    Space,
}

/// Characters of every line, in reveal order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealPlan {
    pub lines: Vec<Vec<Unit>>,
}

impl RevealPlan {
    pub fn from_split(doc: &Document, split: &SplitResult) -> Self {
        let mut word_index = 0;
        let lines = split
            .lines
            .iter()
            .map(|&line| {
                let mut units = Vec::new();
                for &child in doc.children(line) {
                    if doc.is_element(child) {
                        units.extend(doc.children(child).iter().map(|&ch| Unit::Char {
                            text: doc.text_content(ch),
                            word: word_index,
                        }));
                        word_index += 1;
                    } else if !units.is_empty() {
                        units.push(Unit::Space);
                    }
                }
                // Trailing whitespace is not drawn
                while units.last() == Some(&Unit::Space) {
                    units.pop();
                }
                units
            })
            .collect();
        Self { lines }
    }

    pub fn char_count(&self) -> usize {
        self.lines
            .iter()
            .flatten()
            .filter(|unit| matches!(unit, Unit::Char { .. }))
            .count()
    }

    /// Render with the first `revealed` characters visible
    pub fn render(&self, revealed: usize) -> Vec<Line<'static>> {
        let mut shown = 0;
        self.lines
            .iter()
            .map(|units| {
                let spans: Vec<Span<'static>> = units
                    .iter()
                    .map(|unit| match unit {
                        Unit::Space => Span::raw(" "),
                        Unit::Char { text, word } => {
                            shown += 1;
                            if shown <= revealed {
                                Span::styled(
                                    text.clone(),
                                    Style::default()
                                        .fg(PALETTE[word % PALETTE.len()])
                                        .add_modifier(Modifier::BOLD),
                                )
                            } else {
                                Span::styled("·", Style::default().fg(Color::DarkGray))
                            }
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

struct App {
    plan: RevealPlan,
    total: usize,
    revealed: usize,
}

impl App {
    fn tick(&mut self) {
        if self.revealed < self.total {
            self.revealed += 1;
        }
    }

    fn restart(&mut self) {
        self.revealed = 0;
    }
}

pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, plan: RevealPlan) -> Result<()> {
    let total = plan.char_count();
    let mut app = App {
        plan,
        total,
        revealed: 0,
    };
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r') => app.restart(),
                _ => {}
            }
        }
        if last_tick.elapsed() >= TICK {
            app.tick();
            last_tick = Instant::now();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let title = format!(
        "Lines: {} | Characters: {}/{}",
        app.plan.lines.len(),
        app.revealed,
        app.total
    );
    let content = Paragraph::new(app.plan.render(app.revealed))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("r: Restart reveal"),
    ]));
    f.render_widget(help, chunks[1]);
}

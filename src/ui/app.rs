//! Main TUI application state and logic

use crate::parser::ast::{NodeKind, Program, SourceLocation};
use crate::tree::visit_pre_order;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::panes::{
    render_source_pane, render_status_bar, render_tree_pane, SourceScrollState, StatusRenderData,
    TreeScrollState,
};

/// Lines moved by PageUp/PageDown
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// One line of the dump, flattened for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub kind: NodeKind,
    pub payload: Option<String>,
    pub location: SourceLocation,
}

/// The main application state
pub struct App {
    program: Program,

    /// The source code the tree was parsed from
    pub source_code: String,

    /// Dump lines in print order
    pub lines: Vec<TreeLine>,

    /// Index into `lines` of the selected node
    pub selected: usize,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tree_scroll: TreeScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over a parsed tree and the text it came from
    pub fn new(program: Program, source_code: String) -> Self {
        let mut lines = Vec::new();
        visit_pre_order(&program, |node, depth| {
            lines.push(TreeLine {
                depth,
                kind: node.kind(),
                payload: node.payload().map(str::to_string),
                location: node.location(),
            });
        });

        App {
            program,
            source_code,
            lines,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: SourceScrollState::default(),
            tree_scroll: TreeScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn selected_line(&self) -> Option<&TreeLine> {
        self.lines.get(self.selected)
    }

    /// Hand the tree back once the explorer is done with it
    pub fn into_program(self) -> Program {
        self.program
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let current_line = self.selected_line().map_or(0, |line| line.location.line);

        render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tree_pane(
            frame,
            columns[1],
            &self.lines,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let status = StatusRenderData {
            message: &self.status_message,
            selected: self.selected,
            total: self.lines.len(),
            selected_line: self.selected_line(),
        };
        render_status_bar(frame, main_chunks[1], &status);
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(PAGE),
            KeyCode::PageDown => self.move_down(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => {
                self.select(self.lines.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    fn move_up(&mut self, by: usize) {
        match self.focused_pane {
            // Scrolling up makes the marked line move down visually
            FocusedPane::Source => {
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_add(by));
                }
            }
            FocusedPane::Tree => self.select(self.selected.saturating_sub(by)),
        }
    }

    fn move_down(&mut self, by: usize) {
        match self.focused_pane {
            FocusedPane::Source => {
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_sub(by));
                }
            }
            FocusedPane::Tree => self.select(self.selected.saturating_add(by)),
        }
    }

    fn select(&mut self, index: usize) {
        if self.lines.is_empty() {
            return;
        }
        self.selected = index.min(self.lines.len() - 1);
        if let Some(line) = self.lines.get(self.selected) {
            self.status_message = format!("{} at {}", line.kind, line.location);
        }
    }
}

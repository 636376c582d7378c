//! Tree pane: the indented dump with a selection cursor

use crate::ui::app::TreeLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the tree pane
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeScrollState {
    pub offset: usize,
}

impl TreeScrollState {
    /// Shift the window just enough to keep `selected` visible
    pub fn follow(&mut self, selected: usize, visible_height: usize) {
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible_height {
            self.offset = selected + 1 - visible_height;
        }
    }
}

fn tree_line(line: &TreeLine, is_selected: bool) -> Line<'_> {
    let mut spans = vec![
        Span::raw("  ".repeat(line.depth)),
        Span::styled(
            line.kind.label(),
            Style::default().fg(DEFAULT_THEME.kind_color(line.kind)),
        ),
    ];
    if let Some(payload) = &line.payload {
        spans.push(Span::styled(": ", Style::default().fg(DEFAULT_THEME.comment)));
        spans.push(Span::styled(
            payload.as_str(),
            Style::default().fg(DEFAULT_THEME.fg).add_modifier(Modifier::BOLD),
        ));
    }

    if is_selected {
        let selected_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
        for span in &mut spans {
            span.style = span.style.patch(selected_style);
        }
    }
    Line::from(spans)
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[TreeLine],
    selected: usize,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_state.follow(selected, visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let marker = if idx == selected {
                Span::styled("▶ ", Style::default().fg(DEFAULT_THEME.secondary))
            } else {
                Span::raw("  ")
            };
            let mut spans = vec![marker];
            spans.extend(tree_line(line, idx == selected).spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_keeps_selection_visible() {
        let mut state = TreeScrollState::default();

        state.follow(3, 5);
        assert_eq!(state.offset, 0);

        state.follow(7, 5);
        assert_eq!(state.offset, 3);

        state.follow(1, 5);
        assert_eq!(state.offset, 1);
    }
}

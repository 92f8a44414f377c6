//! Drawing a pane's region into the frame

use crate::ui::ansi::to_line;
use crate::ui::region::{PaneRegion, Region};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Inner size of a bordered pane drawn into `area`
pub fn inner_size(area: Rect) -> (usize, usize) {
    (
        area.width.saturating_sub(2) as usize,
        area.height.saturating_sub(2) as usize,
    )
}

/// Render whatever the window last painted into `region`
pub fn render_pane(frame: &mut Frame, area: Rect, region: &PaneRegion, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", region.title()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = region.rows();
    if rows.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.dim));
        frame.render_widget(paragraph, area);
        return;
    }

    // rows are already clipped to the pane by the viewport
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(to_line(row)).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

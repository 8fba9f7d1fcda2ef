// Help bar widget: per-tab keyboard shortcut hints.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{TabId, ViewState};

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hints(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Shortcut hints for the active tab.
pub fn hints(state: &ViewState) -> &'static str {
    if state.filter_mode {
        return " Enter:Apply | Esc:Clear | Ctrl+C:Quit";
    }
    match state.active_tab {
        TabId::Chat => " Enter:Send | Up/Down:Prompts | Tab:Switch | Ctrl+C:Quit",
        TabId::Listings => " /:Filter | 1-6:Locations | c:Clear | Tab:Switch | Ctrl+C:Quit",
        TabId::Host => " Up/Down:Fields | Left/Right:Options | Enter:Next/Submit | Tab:Switch | Ctrl+C:Quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Status bar widget: backend status and tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::chat::ApiStatus;
use crate::tui::{TabId, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [status indicator] [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    // Backend status indicator
    let (dot, dot_color) = status_indicator(state.api_status);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));
    spans.push(Span::styled(
        state.api_status.label().to_string(),
        Style::default().fg(Color::White),
    ));

    // Separator
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    // Tab bar
    spans.extend(tab_spans(state.active_tab));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the status dot character and its color.
pub fn status_indicator(status: ApiStatus) -> (&'static str, Color) {
    match status {
        ApiStatus::Checking => ("●", Color::Gray),
        ApiStatus::Ready => ("●", Color::Green),
        ApiStatus::Loading => ("●", Color::Yellow),
        ApiStatus::Error => ("●", Color::Red),
    }
}

/// Build tab indicator spans with labels and the active tab highlighted.
/// E.g. "[Chat] [Listings] [Host]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [
        (TabId::Chat, "Chat"),
        (TabId::Listings, "Listings"),
        (TabId::Host, "Host"),
    ];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

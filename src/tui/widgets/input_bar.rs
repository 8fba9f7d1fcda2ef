// Input bar widget: the bordered input box below the main panel.
//
// Shows the chat input on the chat tab, the live location filter on the
// listings tab, and a form hint on the host tab.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::chat::ApiStatus;
use crate::tui::{TabId, ViewState};

/// Render the input bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, content, dimmed) = contents(state);

    let style = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// Resolve the input bar title, content, and whether it renders dimmed.
pub fn contents(state: &ViewState) -> (&'static str, String, bool) {
    match state.active_tab {
        TabId::Chat => {
            if state.api_status == ApiStatus::Error {
                ("Message", "Backend unavailable".to_string(), true)
            } else if state.sending {
                ("Message", "Waiting for reply...".to_string(), true)
            } else {
                ("Message", format!("{}_", state.chat_input), false)
            }
        }
        TabId::Listings => {
            if state.filter_mode {
                ("Filter by location", format!("{}_", state.listings.filter), false)
            } else if state.listings.filter.is_empty() {
                ("Filter by location", "Press / to filter".to_string(), true)
            } else {
                ("Filter by location", state.listings.filter.clone(), false)
            }
        }
        TabId::Host => (
            "Form",
            "Type to edit, Enter to advance, Enter on the last field submits".to_string(),
            true,
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_tab_shows_input_with_cursor() {
        let mut state = ViewState::default();
        state.chat_input = "hello".to_string();
        let (title, content, dimmed) = contents(&state);
        assert_eq!(title, "Message");
        assert_eq!(content, "hello_");
        assert!(!dimmed);
    }

    #[test]
    fn chat_tab_dimmed_while_sending() {
        let mut state = ViewState::default();
        state.sending = true;
        let (_, content, dimmed) = contents(&state);
        assert_eq!(content, "Waiting for reply...");
        assert!(dimmed);
    }

    #[test]
    fn chat_tab_dimmed_when_backend_down() {
        let mut state = ViewState::default();
        state.api_status = ApiStatus::Error;
        let (_, content, dimmed) = contents(&state);
        assert_eq!(content, "Backend unavailable");
        assert!(dimmed);
    }

    #[test]
    fn listings_tab_shows_filter() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Listings;
        state.filter_mode = true;
        state.listings.filter = "gul".to_string();
        let (title, content, dimmed) = contents(&state);
        assert_eq!(title, "Filter by location");
        assert_eq!(content, "gul_");
        assert!(!dimmed);
    }

    #[test]
    fn listings_tab_hints_when_empty() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Listings;
        let (_, content, dimmed) = contents(&state);
        assert_eq!(content, "Press / to filter");
        assert!(dimmed);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

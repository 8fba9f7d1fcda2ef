// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Main Panel (fill, tab-switched)                   |
// |                                                   |
// +--------------------------------------------------+
// | Input Bar (3 rows)                                |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: backend status and tab indicator.
    pub status_bar: Rect,
    /// Tab-switched content area: chat transcript, listings, host form.
    pub main_panel: Rect,
    /// Bordered input box: chat input or location filter.
    pub input_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | main(fill) | input(3) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // main panel
            Constraint::Length(3), // input bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        input_bar: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

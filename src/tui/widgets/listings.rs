// Property listings widget: filterable table of fetched records.
//
// Table columns: Property, Location, Type, Status, Apts, Floors, Size.
// The location filter from ViewState applies client-side; quick
// locations are shown in the title row area beneath the table header.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::listings::{ListingsPhase, PropertyRecord};
use crate::tui::ViewState;

/// Render the listings panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.listings.phase == ListingsPhase::Loading {
        let paragraph = Paragraph::new("Loading properties...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Properties"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Quick location row above the table.
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_quick_locations(frame, sections[0], state);
    render_table(frame, sections[1], state);
}

fn render_quick_locations(frame: &mut Frame, area: Rect, state: &ViewState) {
    let locations = state.listings.quick_locations();
    let mut spans = vec![Span::styled(
        " Locations: ",
        Style::default().fg(Color::DarkGray),
    )];
    if locations.is_empty() {
        spans.push(Span::styled("--", Style::default().fg(Color::DarkGray)));
    }
    for (i, location) in locations.iter().enumerate() {
        let active = state.listings.filter == *location;
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, location), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &ViewState) {
    let filtered = state.listings.filtered();

    let header = Row::new(vec![
        Cell::from("Property"),
        Cell::from("Location"),
        Cell::from("Type"),
        Cell::from("Status"),
        Cell::from("Apts"),
        Cell::from("Floors"),
        Cell::from("Size (sft)"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = filtered.iter().map(|p| property_row(*p)).collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(build_title(state, filtered.len())),
    );

    frame.render_widget(table, area);
}

/// Build one table row from a record.
pub fn property_row(p: &PropertyRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from(p.property_name.clone()),
        Cell::from(p.location.clone()),
        Cell::from(p.project_type.clone()),
        Cell::from(p.present_status.clone()),
        Cell::from(format_count(p.total_apartments)),
        Cell::from(format_count(p.num_floors)),
        Cell::from(format_count(p.apartment_size)),
    ])
}

/// Build the table title with filter info and match count.
pub fn build_title(state: &ViewState, filtered_count: usize) -> Line<'static> {
    let mut title = String::from("Properties");
    if !state.listings.filter.is_empty() {
        title.push_str(&format!(" \"{}\"", state.listings.filter));
    }
    title.push_str(&format!(" ({})", filtered_count));
    Line::from(title)
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, location: &str) -> PropertyRecord {
        PropertyRecord {
            id: None,
            company_name: "ABC Developers Ltd.".to_string(),
            property_name: name.to_string(),
            location: location.to_string(),
            photo_url: String::new(),
            project_type: "Residential".to_string(),
            total_apartments: 24.0,
            apartment_size: 1450.5,
            present_status: "ongoing".to_string(),
            num_floors: 12.0,
            land_size: 9.85,
        }
    }

    #[test]
    fn title_reflects_filter_and_count() {
        let mut state = ViewState::default();
        state.listings.set_loaded(vec![
            record("A", "Gulshan"),
            record("B", "Banani"),
        ]);
        state.listings.filter = "gulshan".to_string();

        let title = build_title(&state, state.listings.filtered().len());
        let text: String = title.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Properties \"gulshan\" (1)");
    }

    #[test]
    fn title_without_filter() {
        let mut state = ViewState::default();
        state.listings.set_loaded(vec![record("A", "Gulshan")]);
        let title = build_title(&state, 1);
        let text: String = title.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Properties (1)");
    }

    #[test]
    fn format_count_drops_trailing_zero() {
        assert_eq!(format_count(24.0), "24");
        assert_eq!(format_count(1450.5), "1450.5");
        assert_eq!(format_count(0.0), "0");
    }

    #[test]
    fn render_loading_state_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_loaded_state_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.listings.set_loaded(vec![
            record("Sunrise Residency", "Gulshan"),
            record("Lake View", "Banani"),
        ]);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_empty_loaded_state_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.listings.set_loaded(Vec::new());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

// Host form widget: the listing submission form.
//
// One row per field, with the focused field highlighted and editable.
// Choice fields show their option list; the outcome banner sits above
// the fields until the next edit.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::hosting::Field;
use crate::tui::{HostNotice, ViewState};

/// Render the host form into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(notice) = state.host_notice {
        lines.push(Line::from(Span::styled(
            notice.message(),
            notice_style(notice),
        )));
        lines.push(Line::raw(""));
    }

    if state.host_submitting {
        lines.push(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::raw(""));
    }

    for (i, field) in Field::ALL.iter().enumerate() {
        lines.push(field_line(state, *field, i == state.host_focus));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Host Your Property"),
    );
    frame.render_widget(paragraph, area);
}

/// Build the display line for one form field.
pub fn field_line(state: &ViewState, field: Field, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let marker = if focused { "> " } else { "  " };
    let mut spans = vec![
        Span::styled(format!("{marker}{:<22}", field.label()), label_style),
    ];

    if let Some(options) = field.options() {
        // Choice fields render all options with the current one marked.
        let current = state.host_form.display(field);
        for option in options {
            let style = if *option == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!("[{option}]"), style));
            spans.push(Span::raw(" "));
        }
    } else {
        let value = if focused {
            // The raw edit buffer, with a cursor mark.
            format!("{}_", state.host_edit)
        } else {
            state.host_form.display(field)
        };
        spans.push(Span::styled(value, Style::default().fg(Color::White)));
    }

    Line::from(spans)
}

fn notice_style(notice: HostNotice) -> Style {
    match notice {
        HostNotice::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        HostNotice::Failure => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn focused_field_gets_marker_and_cursor() {
        let state = ViewState::default();
        let line = field_line(&state, Field::CompanyName, true);
        let text = line_text(&line);
        assert!(text.starts_with("> "));
        assert!(text.ends_with('_'));
    }

    #[test]
    fn unfocused_field_shows_form_value() {
        let mut state = ViewState::default();
        state.host_form.set(Field::Location, "Gulshan");
        let line = field_line(&state, Field::Location, false);
        let text = line_text(&line);
        assert!(text.contains("Gulshan"));
        assert!(!text.starts_with("> "));
    }

    #[test]
    fn choice_field_highlights_current_option() {
        let state = ViewState::default();
        let line = field_line(&state, Field::ProjectType, false);
        let text = line_text(&line);
        assert!(text.contains("[Residential]"));
        assert!(text.contains("[Commercial]"));
        assert!(text.contains("[Mixed-Use]"));

        let highlighted: Vec<_> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD) && s.style.bg.is_some())
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].content, "[Residential]");
    }

    #[test]
    fn notice_styles() {
        assert_eq!(notice_style(HostNotice::Success).fg, Some(Color::Green));
        assert_eq!(notice_style(HostNotice::Failure).fg, Some(Color::Red));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(100, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_notice_and_submitting() {
        let backend = ratatui::backend::TestBackend::new(100, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.host_notice = Some(HostNotice::Failure);
        state.host_submitting = true;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

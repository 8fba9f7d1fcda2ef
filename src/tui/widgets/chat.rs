// Chat transcript widget.
//
// Renders the conversation with the assistant. Assistant replies go
// through the inline formatter so emphasis markers and headers become
// terminal styles; user messages render verbatim.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::chat::{ChatMessage, Role, QUICK_PROMPTS};
use crate::format::{format_message, Fragment, FragmentStyle};
use crate::tui::ViewState;

/// Render the chat transcript into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, message) in state.transcript.iter().enumerate() {
        lines.extend(message_lines(message));
        if i + 1 < state.transcript.len() {
            lines.push(Line::raw(""));
        }
    }

    if state.sending {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    if state.show_quick_prompts() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Try asking:",
            Style::default().fg(Color::DarkGray),
        )));
        for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
            let selected = state.quick_prompt == Some(i);
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if selected { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{prompt}"),
                style,
            )));
        }
    }

    // Keep the tail of the conversation visible. Long lines wrap, so
    // the row count comes from the wrapped layout at the inner width,
    // not from the logical line count.
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(inner_width);
    let scroll = rows.saturating_sub(inner_height).min(u16::MAX as usize) as u16;

    let paragraph = paragraph
        .block(Block::default().borders(Borders::ALL).title("Nexaur Ai"))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Build the display lines for a single transcript message.
pub fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    match message.role {
        Role::User => {
            let mut lines = vec![Line::from(Span::styled(
                "You",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))];
            for text in message.content.split('\n') {
                lines.push(Line::raw(text.to_string()));
            }
            lines
        }
        Role::Assistant => {
            let mut lines = vec![Line::from(Span::styled(
                "Nexaur",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))];
            for formatted in format_message(&message.content) {
                let mut spans = Vec::new();
                if formatted.bullet {
                    spans.push(Span::raw("• "));
                }
                for fragment in &formatted.fragments {
                    spans.push(fragment_span(fragment));
                }
                lines.push(Line::from(spans));
            }
            lines
        }
    }
}

/// Map a formatted fragment onto a styled span.
pub fn fragment_span(fragment: &Fragment) -> Span<'static> {
    let style = match fragment.style {
        FragmentStyle::Plain => Style::default(),
        FragmentStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
        FragmentStyle::Italic => Style::default().add_modifier(Modifier::ITALIC),
        FragmentStyle::BoldItalic => Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::ITALIC),
        FragmentStyle::Header2 => Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
        FragmentStyle::Header3 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    };
    Span::styled(fragment.text.clone(), style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_renders_verbatim() {
        let lines = message_lines(&ChatMessage::user("hello *world*"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "You");
        // User text is not run through the formatter.
        assert_eq!(lines[1].spans[0].content, "hello *world*");
    }

    #[test]
    fn assistant_bold_becomes_bold_modifier() {
        let lines = message_lines(&ChatMessage::assistant("a **b** c"));
        let spans = &lines[1].spans;
        assert_eq!(spans[0].content, "a ");
        assert_eq!(spans[1].content, "b");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[2].content, " c");
    }

    #[test]
    fn assistant_bullet_gets_dot_prefix() {
        let lines = message_lines(&ChatMessage::assistant("* first item"));
        let spans = &lines[1].spans;
        assert_eq!(spans[0].content, "• ");
        assert_eq!(spans[1].content, "first item");
    }

    #[test]
    fn header_fragments_are_colored() {
        let h3 = fragment_span(&Fragment {
            text: "Summary".to_string(),
            style: FragmentStyle::Header3,
        });
        assert_eq!(h3.style.fg, Some(Color::Cyan));
        assert!(h3.style.add_modifier.contains(Modifier::BOLD));

        let h2 = fragment_span(&Fragment {
            text: "Overview".to_string(),
            style: FragmentStyle::Header2,
        });
        assert_eq!(h2.style.fg, Some(Color::LightCyan));
    }

    #[test]
    fn bold_italic_carries_both_modifiers() {
        let span = fragment_span(&Fragment {
            text: "x".to_string(),
            style: FragmentStyle::BoldItalic,
        });
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert!(span.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn multiline_assistant_message_keeps_line_breaks() {
        let lines = message_lines(&ChatMessage::assistant("first\nsecond"));
        // Name line + two content lines.
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn long_wrapped_reply_keeps_tail_visible() {
        let backend = ratatui::backend::TestBackend::new(30, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.transcript.push(ChatMessage::user("tell me more"));
        // Wraps over far more rows than the logical line count.
        state
            .transcript
            .push(ChatMessage::assistant(format!("{}closing", "detail ".repeat(40))));
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("closing"), "reply tail scrolled out of view");
    }

    #[test]
    fn render_does_not_panic_while_sending() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.transcript.push(ChatMessage::user("question"));
        state.sending = true;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

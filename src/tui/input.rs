// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (tab switching,
// text editing, filtering, form navigation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::chat::QUICK_PROMPTS;
use crate::hosting::Field;
use crate::protocol::UserCommand;

use super::{TabId, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator (a chat/listing submission, or Quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Filter mode: capture printable characters and special keys
    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    // Tab switching works from every surface
    match key_event.code {
        KeyCode::Tab => {
            view_state.active_tab = view_state.active_tab.next();
            return None;
        }
        KeyCode::BackTab => {
            view_state.active_tab = view_state.active_tab.prev();
            return None;
        }
        _ => {}
    }

    match view_state.active_tab {
        TabId::Chat => handle_chat_key(key_event, view_state),
        TabId::Listings => handle_listings_key(key_event, view_state),
        TabId::Host => handle_host_key(key_event, view_state),
    }
}

// ---------------------------------------------------------------------------
// Chat tab
// ---------------------------------------------------------------------------

fn handle_chat_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) => {
            if view_state.chat_input_enabled() {
                view_state.chat_input.push(c);
                view_state.quick_prompt = None;
            }
            None
        }
        KeyCode::Backspace => {
            view_state.chat_input.pop();
            None
        }
        // Quick prompt selection, offered only on a fresh transcript
        // with an empty input.
        KeyCode::Up | KeyCode::Down => {
            if view_state.show_quick_prompts() && view_state.chat_input.is_empty() {
                view_state.quick_prompt = cycle_prompt(
                    view_state.quick_prompt,
                    key_event.code == KeyCode::Down,
                );
            }
            None
        }
        KeyCode::Esc => {
            view_state.chat_input.clear();
            view_state.quick_prompt = None;
            None
        }
        KeyCode::Enter => {
            if !view_state.chat_input_enabled() {
                return None;
            }
            let text = if view_state.chat_input.trim().is_empty() {
                // Empty input submits the selected quick prompt, if any.
                let index = view_state.quick_prompt?;
                if !view_state.show_quick_prompts() {
                    return None;
                }
                QUICK_PROMPTS[index].to_string()
            } else {
                std::mem::take(&mut view_state.chat_input)
            };
            view_state.quick_prompt = None;
            Some(UserCommand::SubmitChat(text))
        }
        _ => None,
    }
}

fn cycle_prompt(current: Option<usize>, forward: bool) -> Option<usize> {
    let len = QUICK_PROMPTS.len();
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

// ---------------------------------------------------------------------------
// Listings tab
// ---------------------------------------------------------------------------

fn handle_listings_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        // Filter mode entry
        KeyCode::Char('/') => {
            view_state.filter_mode = true;
            None
        }
        // Clear the filter
        KeyCode::Char('c') | KeyCode::Esc => {
            view_state.listings.filter.clear();
            None
        }
        // Quick location shortcuts: 1..=N apply a distinct location
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(index) = c.to_digit(10).map(|d| d as usize).filter(|d| *d >= 1) {
                let locations = view_state.listings.quick_locations();
                if let Some(location) = locations.get(index - 1) {
                    view_state.listings.filter = location.clone();
                }
            }
            None
        }
        _ => None,
    }
}

/// Handle key events while in filter mode.
///
/// In filter mode:
/// - Printable characters are appended to the filter (applied live)
/// - Backspace removes the last character
/// - Enter exits filter mode keeping the text, Esc exits and clears it
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.listings.filter.clear();
            None
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
            None
        }
        KeyCode::Backspace => {
            view_state.listings.filter.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.listings.filter.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Host tab
// ---------------------------------------------------------------------------

fn handle_host_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let field = view_state.focused_field();
    match key_event.code {
        KeyCode::Up => {
            let index = view_state.host_focus.saturating_sub(1);
            view_state.set_host_focus(index);
            None
        }
        KeyCode::Down => {
            let index = (view_state.host_focus + 1).min(Field::ALL.len() - 1);
            view_state.set_host_focus(index);
            None
        }
        // Choice fields cycle their options with Left/Right
        KeyCode::Left | KeyCode::Right => {
            if let Some(options) = field.options() {
                let current = options
                    .iter()
                    .position(|o| *o == view_state.host_form.display(field))
                    .unwrap_or(0);
                let next = if key_event.code == KeyCode::Right {
                    (current + 1) % options.len()
                } else {
                    (current + options.len() - 1) % options.len()
                };
                view_state.host_form.set(field, options[next]);
                view_state.host_edit = options[next].to_string();
                view_state.host_notice = None;
            }
            None
        }
        KeyCode::Char(c) => {
            // Choice fields take no free text.
            if field.options().is_none() {
                view_state.host_edit.push(c);
                let edit = view_state.host_edit.clone();
                view_state.host_form.set(field, &edit);
                view_state.host_notice = None;
            }
            None
        }
        KeyCode::Backspace => {
            if field.options().is_none() {
                view_state.host_edit.pop();
                let edit = view_state.host_edit.clone();
                view_state.host_form.set(field, &edit);
                view_state.host_notice = None;
            }
            None
        }
        KeyCode::Enter => {
            // Enter advances through the form; on the last field it
            // submits the payload.
            if view_state.host_focus + 1 < Field::ALL.len() {
                view_state.set_host_focus(view_state.host_focus + 1);
                None
            } else if view_state.host_submitting {
                None
            } else {
                view_state.host_submitting = true;
                view_state.host_notice = None;
                Some(UserCommand::SubmitListing(view_state.host_form.payload()))
            }
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

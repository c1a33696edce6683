//! Event handling for the ratatui prompt
//!
//! Maps keyboard and mouse events to state changes and loop outcomes.

use super::state::PromptState;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Resolve with the highlighted row
    Confirm,
    /// Resolve with nothing
    Abort,
    /// Query changed, a new suggestion cycle is needed
    QueryChanged,
    /// No action taken
    Ignored,
}

/// Handle one terminal event
pub fn handle_event<T>(state: &mut PromptState<T>, event: &Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, *key),
        Event::Mouse(mouse) => handle_mouse(state, *mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    }
}

/// Handle a key press
pub fn handle_key<T>(state: &mut PromptState<T>, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Abort,
        (KeyCode::Enter, _) => EventResult::Confirm,

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            state.query_cursor_home();
            EventResult::Continue
        }
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            state.query_cursor_end();
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            if state.query.is_empty() {
                EventResult::Ignored
            } else {
                state.query_clear();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => {
            if state.query_cursor == 0 {
                EventResult::Ignored
            } else {
                state.query_backspace();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Delete, _) => {
            if state.query_cursor >= state.query.len() {
                EventResult::Ignored
            } else {
                state.query_delete();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
fn handle_mouse<T>(state: &mut PromptState<T>, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages.

use crate::compare::SlotIndex;

use super::messages::AppMsg;

/// Maps a key event to an application message.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('1') => Some(AppMsg::ToggleSlot(SlotIndex::One)),
        KeyCode::Char('2') => Some(AppMsg::ToggleSlot(SlotIndex::Two)),
        KeyCode::Tab => Some(AppMsg::NextMedia),
        KeyCode::BackTab => Some(AppMsg::PreviousMedia),
        KeyCode::Enter => Some(AppMsg::OpenMedia),
        KeyCode::Esc => Some(AppMsg::EscapePressed),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}

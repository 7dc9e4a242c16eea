//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm below, in the block for the focus it
//!    applies to.
//! 3. Update the help text in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, Focus};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // The detail popup swallows everything except the keys that close it.
    if app.detail_open {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_detail();
        }
        return;
    }

    // Bindings that work regardless of focus.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            app.next_page();
            return;
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            app.previous_page();
            return;
        }
        KeyCode::Char('r') => {
            app.refresh();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Topics => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.topic_next(),
            KeyCode::Up | KeyCode::Char('k') => app.topic_previous(),
            KeyCode::Right | KeyCode::Char('l') => app.next_page(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
            KeyCode::Enter => app.select_topic(),
            _ => {}
        },
        Focus::Grid => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.card_down(),
            KeyCode::Up | KeyCode::Char('k') => app.card_up(),
            KeyCode::Right | KeyCode::Char('l') => app.card_right(),
            KeyCode::Left | KeyCode::Char('h') => app.card_left(),
            KeyCode::Enter => app.open_detail(),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    use crate::app::tests::{dummy_app, loaded_app};
    use crate::app::FeedStatus;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = dummy_app();
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, key);
        assert!(!app.quit);
    }

    #[test]
    fn q_quits() {
        let mut app = dummy_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.quit);
    }

    #[test]
    fn page_keys_navigate_and_saturate() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Char('n')));
        handle_key_event(&mut app, press(KeyCode::PageDown));
        handle_key_event(&mut app, press(KeyCode::Right));
        assert_eq!(app.pager.page_label(), (3, 3));

        handle_key_event(&mut app, press(KeyCode::Char('p')));
        handle_key_event(&mut app, press(KeyCode::Left));
        handle_key_event(&mut app, press(KeyCode::PageUp));
        assert_eq!(app.pager.page_label(), (1, 3));
    }

    #[test]
    fn arrows_follow_focus() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(app.topic_state.selected(), Some(1));
        assert_eq!(app.selected_card, 0);

        handle_key_event(&mut app, press(KeyCode::Tab));
        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(app.topic_state.selected(), Some(1));
        assert_eq!(app.selected_card, 2);
    }

    #[test]
    fn enter_selects_topic_then_opens_detail() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert_eq!(app.active_topic, Some(0));
        assert_eq!(app.feed, FeedStatus::Loading);

        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Tab));
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(app.detail_open);

        // While the popup is open, q closes it rather than quitting.
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.detail_open);
        assert!(!app.quit);
    }
}

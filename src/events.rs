use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Step through risks while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Risks),

        // Navigation (up/down for risks, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab bar sits on row 1
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            if let Some(view) = tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use envwatch_adapters::FeedEntry;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit() {
        let (_tx, _errors, mut app) = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_view_switching() {
        let (_tx, _errors, mut app) = test_app();

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Risks);
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.current_view, View::Overview);
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Risks);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (_tx, _errors, mut app) = test_app();

        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_detail_overlay_keys() {
        let (tx, _errors, mut app) = test_app();
        tx.send(Some(FeedEntry::default())).unwrap();
        app.reload_data().unwrap();

        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);

        // Selection still moves, view switching does not
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.selected_risk, 2);
        assert_eq!(app.current_view, View::Overview);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_detail_overlay);
        assert!(app.running);
    }

    #[test]
    fn test_refresh_key() {
        let (_tx, _errors, mut app) = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert!(app.take_refresh_request());
    }

    fn click(column: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row: 1,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_tab_click() {
        let (_tx, _errors, mut app) = test_app();
        handle_mouse_event(&mut app, click(16));
        assert_eq!(app.current_view, View::Risks);
    }

    #[test]
    fn test_tab_click_on_padding() {
        let (_tx, _errors, mut app) = test_app();

        handle_mouse_event(&mut app, click(25));
        assert_eq!(app.current_view, View::Risks);

        handle_mouse_event(&mut app, click(13));
        assert_eq!(app.current_view, View::Overview);

        // Divider and the empty bar beyond the tabs do nothing
        handle_mouse_event(&mut app, click(14));
        assert_eq!(app.current_view, View::Overview);
        handle_mouse_event(&mut app, click(40));
        assert_eq!(app.current_view, View::Overview);
    }
}

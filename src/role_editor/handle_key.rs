// src/role_editor/handle_key.rs

use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{EditorFocus, RoleEditor};
use crate::event::AppEvent;

impl RoleEditor {
    /// Route a key press. Global shortcuts come back as [`AppEvent`]s for the
    /// app loop; everything else is consumed by the focused field.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<AppEvent> {
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_notice();
            }
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => return Some(AppEvent::Quit),
            KeyCode::Char('s') if ctrl => return Some(AppEvent::Submit),
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.previous());
                return None;
            }
            _ => {}
        }

        match self.focus {
            EditorFocus::RoleName => self.handle_role_name_key(key, now),
            EditorFocus::ModulePicker => {
                let events = self.picker.handle_key(key);
                self.apply_picker_events(events);
            }
            EditorFocus::Permissions => self.handle_permissions_key(key),
        }
        None
    }

    fn handle_role_name_key(&mut self, key: KeyEvent, now: Instant) {
        let mut role_name = self.role_name.clone();
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                role_name.push(c);
            }
            KeyCode::Backspace => {
                role_name.pop();
            }
            _ => return,
        }
        if role_name != self.role_name {
            self.set_role_name(role_name, now);
        }
    }

    fn handle_permissions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.shown_slots().len().saturating_sub(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle_focused();
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.shown_slots().len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }
}

// src/role_editor/handle_mouse.rs

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::{EditorFocus, RoleEditor};

impl RoleEditor {
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.notice.is_some() {
            return;
        }

        let position = Position::new(mouse.column, mouse.row);
        // Hit-test against the regions as drawn; picking an option closes the menu
        let inside_picker = self.picker.contains(position);

        // The picker sees every click so it can close on outside clicks
        let events = self.picker.handle_mouse(mouse);
        self.apply_picker_events(events);

        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        if inside_picker {
            // Already opened or closed by the picker itself
            self.focus = EditorFocus::ModulePicker;
        } else if self.role_name_area.contains(position) {
            self.set_focus(EditorFocus::RoleName);
        } else if self.table_area.contains(position) {
            self.set_focus(EditorFocus::Permissions);
        }
    }
}

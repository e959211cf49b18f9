// src/role_editor/toggle_permission.rs

use tracing::debug;

use super::RoleEditor;
use crate::role::PermissionSlot;

impl RoleEditor {
    /// Flip the checkbox for `slot` and mirror it into the submitted set.
    /// Returns the new checkbox state, or `None` when the slot is not in the tree.
    pub fn toggle_permission(&mut self, slot: PermissionSlot) -> Option<bool> {
        let permission = self.tree.permission(slot)?;
        let id = permission.permission_id.clone();

        let mark = self.checkbox_marks.entry(slot).or_insert(permission.is_allowed);
        *mark = !*mark;
        let checked = *mark;

        let Some(id) = id else {
            debug!("Permission {:?} has no id, checkbox only", slot);
            return Some(checked);
        };
        if checked {
            self.permissions.insert(id.clone());
        } else {
            self.permissions.shift_remove(&id);
        }
        debug!("Permission {} is now {}", id, if checked { "checked" } else { "unchecked" });
        Some(checked)
    }

    pub fn toggle_focused(&mut self) -> Option<bool> {
        let slot = self.focused_slot()?;
        self.toggle_permission(slot)
    }

    pub fn is_checked(&self, slot: PermissionSlot) -> bool {
        self.checkbox_marks
            .get(&slot)
            .copied()
            .unwrap_or_else(|| self.tree.permission(slot).is_some_and(|p| p.is_allowed))
    }
}

// src/role_editor/process_messages.rs

use std::time::Instant;

use tracing::{error, info};

use super::{EditorMessage, EditorPhase, RoleEditor};
use crate::role::RoleTree;

impl RoleEditor {
    pub fn apply_message(&mut self, message: EditorMessage, now: Instant) {
        match message {
            EditorMessage::RoleFetched { request, role_name, result } => match result {
                Ok(tree) => {
                    info!(
                        "Role fetch #{} for {:?} returned {} module(s)",
                        request,
                        role_name,
                        tree.modules.len()
                    );
                    self.apply_fetched_tree(tree);
                }
                Err(e) => {
                    error!("Role fetch #{} for {:?} failed: {}", request, role_name, e);
                    let fallback = self.snapshot.clone().unwrap_or_default();
                    self.set_tree(fallback);
                    self.phase = EditorPhase::ErrorFallback;
                }
            },
            EditorMessage::RoleSubmitted { request, mode, result } => {
                self.finish_submit(request, mode, result, now);
            }
        }
    }

    fn apply_fetched_tree(&mut self, tree: RoleTree) {
        self.permissions = tree.allowed_permissions();
        self.snapshot = Some(tree.clone());
        self.set_tree(tree);
        self.phase = EditorPhase::Idle;
    }
}

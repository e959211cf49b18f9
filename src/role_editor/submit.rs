// src/role_editor/submit.rs

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info, warn};

use super::{
    EditorMessage, EditorPhase, Notice, RoleEditor, SubmitMode, CREATED_NOTICE, FAILED_NOTICE,
    MISSING_NAME_NOTICE, UPDATED_NOTICE,
};
use crate::role::{RoleRequest, RoleTree};

/// JSON truthiness: null, false, 0 and "" are falsy; arrays and objects are
/// always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl RoleEditor {
    /// Update when the displayed tree came from an existing role, create otherwise.
    pub fn submit_mode(&self) -> SubmitMode {
        if self.tree.exists_remotely() {
            SubmitMode::Update
        } else {
            SubmitMode::Create
        }
    }

    pub fn submit(&mut self) {
        self.phase = EditorPhase::Loading;

        if self.role_name.is_empty() {
            warn!("Submit attempted without a role name");
            self.notice = Some(Notice::error(MISSING_NAME_NOTICE));
            self.phase = EditorPhase::Idle;
            return;
        }

        let mode = self.submit_mode();
        let body = RoleRequest {
            permissions: self.permissions.iter().cloned().collect(),
            name: self.role_name.clone(),
        };
        let request = self.next_request_id();
        info!(
            "Submitting role #{} {:?} ({:?}, {} permission(s))",
            request,
            body.name,
            mode,
            body.permissions.len()
        );

        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match mode {
                SubmitMode::Create => api.create_role(&body).await,
                SubmitMode::Update => api.update_role(&body.name, &body).await,
            };
            let _ = tx.send(EditorMessage::RoleSubmitted {
                request,
                mode,
                result: result.map_err(|e| e.to_string()),
            });
        });
    }

    pub(super) fn finish_submit(
        &mut self,
        request: u64,
        mode: SubmitMode,
        result: Result<Value, String>,
        now: Instant,
    ) {
        match result {
            Ok(body) => {
                info!("Role submit #{} finished", request);
                if is_truthy(&body) {
                    let message = match mode {
                        SubmitMode::Update => UPDATED_NOTICE,
                        SubmitMode::Create => CREATED_NOTICE,
                    };
                    self.notice = Some(Notice::info(message));
                }
            }
            Err(e) => {
                error!("Role submit #{} failed: {}", request, e);
                self.notice = Some(Notice::error(FAILED_NOTICE));
            }
        }
        self.reset_form(now);
    }

    fn reset_form(&mut self, now: Instant) {
        self.set_role_name(String::new(), now);
        self.permissions.clear();
        self.set_tree(RoleTree::default());
        self.cursor = 0;
        self.phase = EditorPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}

// src/role_editor/mod.rs

//! Role editor screen: role name input, module picker and permission table,
//! wired to the role API. Requests run on spawned tasks and report back over
//! a channel that the app loop drains into [`RoleEditor::apply_message`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexSet;
use ratatui::layout::Rect;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::RoleApi;
use crate::config::AppConfig;
use crate::role::{EntityId, PermissionSlot, RoleTree};
use crate::ui::widgets::multi_select::{MultiSelect, MultiSelectEvent};
use crate::util::debounce::Debouncer;

mod handle_key;
mod handle_mouse;
mod process_messages;
mod submit;
mod toggle_permission;

pub use submit::is_truthy;

pub const MODULE_PLACEHOLDER: &str = "Pick modules";
pub const ROLE_NAME_PLACEHOLDER: &str = "Enter Role Name";
pub const MISSING_NAME_NOTICE: &str = "Please enter a role name";
pub const CREATED_NOTICE: &str = "Role created successfully";
pub const UPDATED_NOTICE: &str = "Role updated successfully";
pub const FAILED_NOTICE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Loading,
    /// Last fetch failed; the table shows the last good snapshot.
    ErrorFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    RoleName,
    ModulePicker,
    Permissions,
}

impl EditorFocus {
    pub fn next(self) -> Self {
        match self {
            EditorFocus::RoleName => EditorFocus::ModulePicker,
            EditorFocus::ModulePicker => EditorFocus::Permissions,
            EditorFocus::Permissions => EditorFocus::RoleName,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            EditorFocus::RoleName => EditorFocus::Permissions,
            EditorFocus::ModulePicker => EditorFocus::RoleName,
            EditorFocus::Permissions => EditorFocus::ModulePicker,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message; while one is shown the editor only accepts dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => " Done ",
            NoticeKind::Error => " Attention ",
        }
    }
}

/// Completion of a spawned request.
#[derive(Debug, Clone)]
pub enum EditorMessage {
    RoleFetched {
        request: u64,
        role_name: String,
        result: Result<RoleTree, String>,
    },
    RoleSubmitted {
        request: u64,
        mode: SubmitMode,
        result: Result<Value, String>,
    },
}

#[derive(Debug)]
pub struct RoleEditor {
    api: Arc<dyn RoleApi>,
    phase: EditorPhase,
    focus: EditorFocus,

    role_name: String,
    debouncer: Debouncer<String>,

    // Displayed tree and the last one that arrived successfully
    tree: RoleTree,
    snapshot: Option<RoleTree>,

    /// Ids sent on submit. Independent of the tree layout.
    permissions: IndexSet<EntityId>,
    /// Checkbox state as drawn; seeded from `isAllowed` when a tree lands.
    checkbox_marks: HashMap<PermissionSlot, bool>,
    cursor: usize,

    picked_modules: Vec<String>,
    picker: MultiSelect,

    notice: Option<Notice>,
    spinner_frame: usize,
    next_request: u64,

    message_tx: mpsc::UnboundedSender<EditorMessage>,
    message_rx: mpsc::UnboundedReceiver<EditorMessage>,

    // Hit regions from the last render
    role_name_area: Rect,
    table_area: Rect,
}

impl RoleEditor {
    pub fn new(api: Arc<dyn RoleApi>, config: &AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let picker = MultiSelect::new(Vec::new(), config.initial_modules.clone(), MODULE_PLACEHOLDER)
            .with_title(" Modules ");
        let picked_modules = picker.selected();

        Self {
            api,
            phase: EditorPhase::Idle,
            focus: EditorFocus::RoleName,
            role_name: String::new(),
            debouncer: Debouncer::new(String::new(), config.debounce()),
            tree: RoleTree::default(),
            snapshot: None,
            permissions: IndexSet::new(),
            checkbox_marks: HashMap::new(),
            cursor: 0,
            picked_modules,
            picker,
            notice: None,
            spinner_frame: 0,
            next_request: 0,
            message_tx,
            message_rx,
            role_name_area: Rect::default(),
            table_area: Rect::default(),
        }
    }

    /// Initial fetch with the (empty) committed role name.
    pub fn start(&mut self) {
        let role_name = self.debouncer.committed().clone();
        self.fetch_role(role_name);
    }

    fn next_request_id(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    pub fn fetch_role(&mut self, role_name: String) {
        let request = self.next_request_id();
        self.phase = EditorPhase::Loading;
        info!("Fetching role #{} for {:?}", request, role_name);

        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_role(&role_name).await.map_err(|e| e.to_string());
            let _ = tx.send(EditorMessage::RoleFetched { request, role_name, result });
        });
    }

    /// Advance timers. Returns whether anything visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.phase == EditorPhase::Loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            changed = true;
        }

        if let Some(role_name) = self.debouncer.poll(now) {
            debug!("Role name settled on {:?}", role_name);
            self.fetch_role(role_name);
            changed = true;
        }

        changed
    }

    /// Wait for the next request completion.
    pub async fn next_message(&mut self) -> Option<EditorMessage> {
        self.message_rx.recv().await
    }

    pub fn set_role_name(&mut self, role_name: String, now: Instant) {
        self.role_name = role_name;
        self.debouncer.push(self.role_name.clone(), now);
    }

    pub fn set_focus(&mut self, focus: EditorFocus) {
        if self.focus == focus {
            return;
        }
        let events = if focus == EditorFocus::ModulePicker {
            self.picker.open()
        } else {
            self.picker.close()
        };
        self.apply_picker_events(events);
        self.focus = focus;
    }

    pub(crate) fn apply_picker_events(&mut self, events: Vec<MultiSelectEvent>) {
        for event in events {
            if let MultiSelectEvent::SelectionChanged(selection) = event {
                debug!("Module filter is now {:?}", selection);
                self.picked_modules = selection;
                self.clamp_cursor();
            }
        }
    }

    /// Replace the displayed tree and everything drawn from it.
    fn set_tree(&mut self, tree: RoleTree) {
        self.checkbox_marks = tree
            .shown_slots(&[])
            .into_iter()
            .filter_map(|slot| tree.permission(slot).map(|p| (slot, p.is_allowed)))
            .collect();
        let events = self.picker.set_options(tree.module_names());
        self.tree = tree;
        self.apply_picker_events(events);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let count = self.shown_slots().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    pub fn record_layout(&mut self, role_name_area: Rect, table_area: Rect) {
        self.role_name_area = role_name_area;
        self.table_area = table_area;
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn tree(&self) -> &RoleTree {
        &self.tree
    }

    pub fn snapshot(&self) -> Option<&RoleTree> {
        self.snapshot.as_ref()
    }

    pub fn permissions(&self) -> &IndexSet<EntityId> {
        &self.permissions
    }

    pub fn picked_modules(&self) -> &[String] {
        &self.picked_modules
    }

    pub fn picker(&self) -> &MultiSelect {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut MultiSelect {
        &mut self.picker
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn shown_slots(&self) -> Vec<PermissionSlot> {
        self.tree.shown_slots(&self.picked_modules)
    }

    pub fn focused_slot(&self) -> Option<PermissionSlot> {
        self.shown_slots().get(self.cursor).copied()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.phase == EditorPhase::Loading {
            "loading..."
        } else if self.tree.exists_remotely() {
            "Update Role"
        } else {
            "Create Role"
        }
    }
}

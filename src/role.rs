// src/role.rs

//! Wire model for the role API: a role owns modules, modules own sub-modules,
//! sub-modules own permissions.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier as the API sends it: sometimes a number, sometimes a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Zero and the empty string count as "no id".
    pub fn is_truthy(&self) -> bool {
        match self {
            EntityId::Number(n) => *n != 0,
            EntityId::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTree {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "roleID")]
    pub role_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modules: Vec<RoleModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleModule {
    #[serde(default, rename = "moduleName", deserialize_with = "null_as_default")]
    pub module_name: String,
    #[serde(default, rename = "moduleID")]
    pub module_id: Option<EntityId>,
    #[serde(default, rename = "subModules", deserialize_with = "null_as_default")]
    pub sub_modules: Vec<SubModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubModule {
    #[serde(default, rename = "moduleName", deserialize_with = "null_as_default")]
    pub module_name: String,
    #[serde(default, rename = "moduleID")]
    pub module_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Permissions without an id still render but are never submitted.
    #[serde(default, rename = "permissionId")]
    pub permission_id: Option<EntityId>,
    #[serde(default, rename = "actionName", deserialize_with = "null_as_default")]
    pub action_name: String,
    #[serde(default, rename = "isAllowed", deserialize_with = "null_as_default")]
    pub is_allowed: bool,
}

/// Body of both the create and the update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub permissions: Vec<EntityId>,
    pub name: String,
}

/// Position of one permission inside a [`RoleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionSlot {
    pub module: usize,
    pub sub_module: usize,
    pub permission: usize,
}

impl RoleTree {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// A tree that came back with a name or a role id describes a role the
    /// backend already knows, so submitting it is an update.
    pub fn exists_remotely(&self) -> bool {
        let named = self.name.as_deref().is_some_and(|n| !n.is_empty());
        let has_id = self.role_id.as_ref().is_some_and(EntityId::is_truthy);
        named || has_id
    }

    /// Non-empty module names, in tree order. These feed the module picker.
    pub fn module_names(&self) -> Vec<String> {
        self.modules
            .iter()
            .map(|m| m.module_name.clone())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Every permission the backend reports as allowed.
    pub fn allowed_permissions(&self) -> IndexSet<EntityId> {
        self.modules
            .iter()
            .flat_map(|m| m.sub_modules.iter())
            .flat_map(|s| s.permissions.iter())
            .filter(|p| p.is_allowed)
            .filter_map(|p| p.permission_id.clone())
            .collect()
    }

    /// Modules to display with their index in the tree. An empty pick list
    /// shows everything.
    pub fn shown_modules(&self, picked: &[String]) -> Vec<(usize, &RoleModule)> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, m)| picked.is_empty() || picked.contains(&m.module_name))
            .collect()
    }

    /// Permission slots of the shown modules, in display order.
    pub fn shown_slots(&self, picked: &[String]) -> Vec<PermissionSlot> {
        let mut slots = Vec::new();
        for (module_idx, module) in self.shown_modules(picked) {
            for (sub_idx, sub) in module.sub_modules.iter().enumerate() {
                for permission_idx in 0..sub.permissions.len() {
                    slots.push(PermissionSlot {
                        module: module_idx,
                        sub_module: sub_idx,
                        permission: permission_idx,
                    });
                }
            }
        }
        slots
    }

    pub fn permission(&self, slot: PermissionSlot) -> Option<&Permission> {
        self.modules
            .get(slot.module)?
            .sub_modules
            .get(slot.sub_module)?
            .permissions
            .get(slot.permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "Manager",
        "roleID": 12,
        "modules": [
            {
                "moduleName": "Sale",
                "moduleID": 1,
                "subModules": [
                    {
                        "moduleName": "Invoices",
                        "moduleID": 11,
                        "permissions": [
                            { "permissionId": 101, "actionName": "View", "isAllowed": true },
                            { "permissionId": 102, "actionName": "Edit", "isAllowed": false }
                        ]
                    }
                ]
            },
            {
                "moduleName": "HR",
                "moduleID": "hr",
                "subModules": [
                    {
                        "moduleName": "Payroll",
                        "moduleID": "hr-pay",
                        "permissions": [
                            { "permissionId": "p-201", "actionName": "Approve", "isAllowed": true }
                        ]
                    }
                ]
            },
            { "moduleName": null, "moduleID": 3, "subModules": null }
        ]
    }"#;

    #[test]
    fn test_parse_mixed_ids() {
        let tree: RoleTree = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(tree.name.as_deref(), Some("Manager"));
        assert_eq!(tree.role_id, Some(EntityId::Number(12)));
        assert_eq!(tree.modules.len(), 3);
        assert_eq!(tree.modules[1].module_id, Some(EntityId::from("hr")));
        assert!(tree.modules[2].sub_modules.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let tree: RoleTree = serde_json::from_str(r#"{ "modules": null }"#).unwrap();
        assert!(tree.is_empty());
        assert!(!tree.exists_remotely());

        let tree: RoleTree = serde_json::from_str("{}").unwrap();
        assert_eq!(tree, RoleTree::default());
    }

    #[test]
    fn test_permission_without_id_is_kept_but_not_allowed() {
        let tree: RoleTree = serde_json::from_str(
            r#"{
                "modules": [{
                    "moduleName": "Sale",
                    "subModules": [{
                        "moduleName": "Invoices",
                        "permissions": [
                            { "actionName": "View", "isAllowed": true },
                            { "permissionId": 102, "actionName": "Edit", "isAllowed": true }
                        ]
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(tree.shown_slots(&[]).len(), 2);
        assert_eq!(tree.modules[0].sub_modules[0].permissions[0].permission_id, None);
        assert_eq!(
            tree.allowed_permissions().into_iter().collect::<Vec<_>>(),
            vec![EntityId::Number(102)]
        );
    }

    #[test]
    fn test_exists_remotely() {
        let mut tree = RoleTree::default();
        assert!(!tree.exists_remotely());

        tree.role_id = Some(EntityId::Number(0));
        assert!(!tree.exists_remotely());

        tree.role_id = Some(EntityId::Number(7));
        assert!(tree.exists_remotely());

        tree.role_id = None;
        tree.name = Some(String::new());
        assert!(!tree.exists_remotely());

        tree.name = Some("Auditor".to_string());
        assert!(tree.exists_remotely());
    }

    #[test]
    fn test_module_names_skip_blank() {
        let tree: RoleTree = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(tree.module_names(), vec!["Sale".to_string(), "HR".to_string()]);
    }

    #[test]
    fn test_allowed_permissions() {
        let tree: RoleTree = serde_json::from_str(SAMPLE).unwrap();
        let allowed: Vec<EntityId> = tree.allowed_permissions().into_iter().collect();
        assert_eq!(allowed, vec![EntityId::Number(101), EntityId::from("p-201")]);
    }

    #[test]
    fn test_shown_modules_filter() {
        let tree: RoleTree = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(tree.shown_modules(&[]).len(), 3);

        let shown = tree.shown_modules(&["HR".to_string()]);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, 1);

        let slots = tree.shown_slots(&["HR".to_string()]);
        assert_eq!(slots.len(), 1);
        assert_eq!(
            tree.permission(slots[0]).map(|p| p.action_name.as_str()),
            Some("Approve")
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = RoleRequest {
            permissions: vec![EntityId::Number(101), EntityId::from("p-201")],
            name: "Manager".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "permissions": [101, "p-201"], "name": "Manager" })
        );
    }
}

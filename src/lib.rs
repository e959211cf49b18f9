pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod role;
pub mod role_editor;
pub mod ui;
pub mod util;

pub use api::{HttpRoleApi, RoleApi};
pub use config::AppConfig;
pub use error::{Result, RoleConsoleError};

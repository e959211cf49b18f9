pub mod role_editor;

mod help;
mod notice;
mod status;
mod text_input;

/// Stateless paragraph builders shared by the screens.
pub struct UiComponent;

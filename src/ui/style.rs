use ratatui::style::{Modifier, Style};

/// Bold when focused, dim italic otherwise.
pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::DIM | Modifier::ITALIC)
    }
}

use ratatui::{
    prelude::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::UiComponent;
use crate::ui::style::dim_unless_focused;

impl UiComponent {
    /// Single-line input box with a placeholder and a cursor bar when focused.
    pub fn text_input<'a>(title: &'a str, value: &'a str, placeholder: &'a str, is_focused: bool) -> Paragraph<'a> {
        let mut spans = Vec::new();
        if value.is_empty() {
            spans.push(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(value, Style::default().fg(Color::White)));
        }
        if is_focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(dim_unless_focused(is_focused, Style::default().fg(Color::Yellow)))
                .title(title)
        )
    }
}

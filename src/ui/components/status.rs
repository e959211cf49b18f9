use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::UiComponent;

impl UiComponent {
    /// Button-like status box; `highlight` switches it to the busy color.
    pub fn status(status: &str, highlight: bool) -> Paragraph<'_> {
        let color = if highlight { Color::Magenta } else { Color::Green };
        Paragraph::new(status)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
            )
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
    }
}

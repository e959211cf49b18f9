use ratatui::{
    layout::Alignment,
    prelude::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::UiComponent;
use crate::role_editor::{Notice, NoticeKind};

impl UiComponent {
    /// Modal body for a blocking notice. The caller clears the area first.
    pub fn notice(notice: &Notice) -> Paragraph<'_> {
        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };

        let text = Text::from(vec![
            Line::from(""),
            Line::from(notice.message.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from("Enter / Esc to dismiss").style(Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .title(notice.title())
            )
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Cell, Clear, Paragraph, Row, StatefulWidget, TableState, Widget},
};

use crate::role::PermissionSlot;
use crate::role_editor::{EditorFocus, EditorPhase, RoleEditor, ROLE_NAME_PLACEHOLDER};
use crate::ui::centered_rect;
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;
use crate::ui::widgets::data_table::{Column, DataTable};

const COLUMNS: [Column; 3] = [
    Column::new("Module", Constraint::Percentage(20)),
    Column::new("Sub Modules", Constraint::Percentage(25)),
    Column::new("Permissions", Constraint::Percentage(55)),
];

const HELP_TEXT: &str = "Tab/Shift+Tab focus • Alt+↓ modules • Space toggle • Ctrl+S save • Ctrl+Q quit";

pub fn render_role_editor(editor: &mut RoleEditor, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(18)])
        .split(main_layout[0]);

    let is_loading = editor.phase() == EditorPhase::Loading;

    title(editor.phase()).render(header_layout[0], buf);
    UiComponent::status(editor.submit_label(), is_loading).render(header_layout[1], buf);

    UiComponent::text_input(
        " Role Name ",
        editor.role_name(),
        ROLE_NAME_PLACEHOLDER,
        editor.focus() == EditorFocus::RoleName,
    )
    .render(main_layout[1], buf);

    render_permission_table(editor, main_layout[3], buf);
    UiComponent::help(HELP_TEXT).render(main_layout[4], buf);

    editor.record_layout(main_layout[1], main_layout[3]);

    // Last so the dropdown draws over the table
    let picker_focused = editor.focus() == EditorFocus::ModulePicker;
    editor.picker_mut().render(main_layout[2], buf, picker_focused);

    if let Some(notice) = editor.notice() {
        let popup = centered_rect(50, 30, area);
        Clear.render(popup, buf);
        UiComponent::notice(notice).render(popup, buf);
    }
}

fn title(phase: EditorPhase) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("Role Console", Style::default().add_modifier(Modifier::BOLD))];
    if phase == EditorPhase::ErrorFallback {
        spans.push(Span::styled(
            "  (fetch failed, showing last loaded role)",
            Style::default().fg(Color::Red),
        ));
    }
    Paragraph::new(Line::from(spans))
        .block(Block::bordered().border_type(BorderType::Rounded))
        .alignment(Alignment::Left)
}

fn render_permission_table(editor: &RoleEditor, area: Rect, buf: &mut Buffer) {
    let is_focused = editor.focus() == EditorFocus::Permissions;
    let focused_slot = if is_focused { editor.focused_slot() } else { None };
    let tree = editor.tree();

    let mut selected_row = None;
    let rows: Vec<Row> = tree
        .shown_modules(editor.picked_modules())
        .into_iter()
        .enumerate()
        .map(|(row_idx, (module_idx, module))| {
            let height = module.sub_modules.len().max(1) as u16;

            let sub_names: Vec<Line> = module
                .sub_modules
                .iter()
                .map(|sub| Line::from(sub.module_name.as_str()))
                .collect();

            let permission_lines: Vec<Line> = module
                .sub_modules
                .iter()
                .enumerate()
                .map(|(sub_idx, sub)| {
                    let mut spans = Vec::new();
                    for (permission_idx, permission) in sub.permissions.iter().enumerate() {
                        let slot = PermissionSlot {
                            module: module_idx,
                            sub_module: sub_idx,
                            permission: permission_idx,
                        };
                        let mark = if editor.is_checked(slot) { "[x]" } else { "[ ]" };

                        // Pill color follows the fetched flag, not the checkbox
                        let mut style = if permission.is_allowed {
                            Style::default().fg(Color::Black).bg(Color::Green)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        if focused_slot == Some(slot) {
                            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                            selected_row = Some(row_idx);
                        }

                        if !spans.is_empty() {
                            spans.push(Span::raw("  "));
                        }
                        spans.push(Span::styled(format!("{} {}", mark, permission.action_name), style));
                    }
                    Line::from(spans)
                })
                .collect();

            Row::new(vec![
                Cell::from(Text::from(Line::from(module.module_name.as_str()).alignment(Alignment::Center))),
                Cell::from(Text::from(sub_names)),
                Cell::from(Text::from(permission_lines)),
            ])
            .height(height)
            .bottom_margin(1)
        })
        .collect();

    let title = format!(" Permissions ({} selected) ", editor.permissions().len());
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(dim_unless_focused(is_focused, Style::default().fg(Color::Cyan)));

    let mut state = TableState::default();
    state.select(selected_row);

    DataTable::new(&COLUMNS)
        .rows(rows)
        .loading(editor.phase() == EditorPhase::Loading, editor.spinner_frame() / 4)
        .block(block)
        .render(area, buf, &mut state);
}

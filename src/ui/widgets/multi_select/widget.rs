// src/ui/widgets/multi_select/widget.rs
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::state::{MultiSelectEvent, MultiSelectIntent, MultiSelectState, MultiSelectStateMachine};
use crate::ui::style::dim_unless_focused;

const MAX_MENU_ROWS: u16 = 8;
const CONTROLS_WIDTH: u16 = 4;
const CLEAR_GLYPH: &str = "×";
const TOGGLE_GLYPH: &str = "▾";
pub const EMPTY_MENU_TEXT: &str = "No more options";

/// Chip field plus dropdown. Owns its [`MultiSelectState`] and remembers the
/// regions it last drew so mouse presses can be routed.
#[derive(Debug)]
pub struct MultiSelect {
    state: MultiSelectState,
    title: String,
    placeholder: String,
    list_state: ListState,

    field_area: Rect,
    menu_area: Option<Rect>,
    menu_inner: Option<Rect>,
    chip_areas: Vec<(Rect, String)>,
    clear_area: Rect,
    toggle_area: Rect,
}

impl MultiSelect {
    pub fn new(options: Vec<String>, initial: Vec<String>, placeholder: impl Into<String>) -> Self {
        Self {
            state: MultiSelectState::new(options, initial),
            title: " Modules ".to_string(),
            placeholder: placeholder.into(),
            list_state: ListState::default(),
            field_area: Rect::default(),
            menu_area: None,
            menu_inner: None,
            chip_areas: Vec::new(),
            clear_area: Rect::default(),
            toggle_area: Rect::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn state(&self) -> &MultiSelectState {
        &self.state
    }

    pub fn selected(&self) -> Vec<String> {
        self.state.selected()
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Run one intent through the state machine.
    pub fn dispatch(&mut self, intent: MultiSelectIntent) -> Vec<MultiSelectEvent> {
        let state = std::mem::take(&mut self.state);
        let (next, events) = MultiSelectStateMachine::transition(state, intent);
        self.state = next;

        if self.state.open {
            self.list_state.select(self.state.focused);
        } else {
            self.list_state.select(None);
            self.menu_area = None;
            self.menu_inner = None;
        }
        events
    }

    pub fn open(&mut self) -> Vec<MultiSelectEvent> {
        self.dispatch(MultiSelectIntent::Open)
    }

    pub fn close(&mut self) -> Vec<MultiSelectEvent> {
        self.dispatch(MultiSelectIntent::Close)
    }

    pub fn set_options(&mut self, options: Vec<String>) -> Vec<MultiSelectEvent> {
        self.dispatch(MultiSelectIntent::SetOptions(options))
    }

    /// Typing always opens the dropdown before the query lands.
    fn type_query(&mut self, query: String) -> Vec<MultiSelectEvent> {
        let mut events = self.dispatch(MultiSelectIntent::Open);
        events.extend(self.dispatch(MultiSelectIntent::SetQuery(query)));
        events
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<MultiSelectEvent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('u') if ctrl => self.dispatch(MultiSelectIntent::Clear),
            KeyCode::Down if alt => self.dispatch(MultiSelectIntent::Toggle),
            KeyCode::Char(c) if !ctrl && !alt => {
                let mut query = self.state.query.clone();
                query.push(c);
                self.type_query(query)
            }
            KeyCode::Backspace => {
                if self.state.query.is_empty() {
                    match self.state.selected.last().cloned() {
                        Some(last) => self.dispatch(MultiSelectIntent::Remove(last)),
                        None => vec![],
                    }
                } else {
                    let mut query = self.state.query.clone();
                    query.pop();
                    self.type_query(query)
                }
            }
            KeyCode::Down if self.state.open => self.dispatch(MultiSelectIntent::FocusNext),
            KeyCode::Up if self.state.open => self.dispatch(MultiSelectIntent::FocusPrevious),
            KeyCode::Enter if self.state.open => self.dispatch(MultiSelectIntent::Confirm),
            KeyCode::Esc if self.state.open => self.dispatch(MultiSelectIntent::Close),
            _ => vec![],
        }
    }

    /// Whether `position` falls inside the field or the open dropdown.
    pub fn contains(&self, position: Position) -> bool {
        self.field_area.contains(position)
            || self.menu_area.is_some_and(|menu| menu.contains(position))
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<MultiSelectEvent> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }

        let position = Position::new(mouse.column, mouse.row);
        if !self.contains(position) {
            return self.dispatch(MultiSelectIntent::Close);
        }

        if self.clear_area.contains(position) {
            return self.dispatch(MultiSelectIntent::Clear);
        }
        if self.toggle_area.contains(position) {
            return self.dispatch(MultiSelectIntent::Toggle);
        }

        let chip = self
            .chip_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, name)| name.clone());
        if let Some(name) = chip {
            return self.dispatch(MultiSelectIntent::Remove(name));
        }

        if let Some(inner) = self.menu_inner {
            if inner.contains(position) {
                let row = (position.y - inner.y) as usize + self.list_state.offset();
                let item = self.state.visible().get(row).map(|s| s.to_string());
                return match item {
                    Some(item) => self.dispatch(MultiSelectIntent::Add(item)),
                    None => vec![],
                };
            }
        }

        if self.field_area.contains(position) {
            return self.dispatch(MultiSelectIntent::Open);
        }
        vec![]
    }

    /// Draw the field into `area` and, when open, the dropdown right below it.
    /// Render this after anything the dropdown may overlap.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let border_style = dim_unless_focused(is_focused, Style::default().fg(Color::Yellow));
        let block = Block::bordered()
            .title(self.title.as_str())
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        self.field_area = area;
        self.chip_areas.clear();

        let content_width = inner.width.saturating_sub(CONTROLS_WIDTH);
        let content = Rect { width: content_width, ..inner };
        let controls = Rect {
            x: inner.x + content_width,
            width: inner.width - content_width,
            ..inner
        };
        self.clear_area = Rect::new(controls.x + 1, controls.y, 1, controls.height.min(1));
        self.toggle_area = Rect::new(controls.x + 3, controls.y, 1, controls.height.min(1));

        let mut spans = Vec::new();
        if self.state.selected.is_empty() && self.state.query.is_empty() {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }

        let right_edge = content.x + content.width;
        let mut x = content.x;
        for name in &self.state.selected {
            let chip = Span::styled(
                format!(" {} {} ", name, CLEAR_GLYPH),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            );
            let width = chip.width() as u16;
            if x.saturating_add(width) > right_edge {
                break;
            }
            self.chip_areas.push((Rect::new(x, content.y, width, 1), name.clone()));
            spans.push(chip);
            spans.push(Span::raw(" "));
            x += width + 1;
        }

        spans.push(Span::styled(self.state.query.clone(), Style::default().fg(Color::White)));
        if is_focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        Paragraph::new(Line::from(spans)).render(content, buf);

        let muted = Style::default().fg(Color::Gray);
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(CLEAR_GLYPH, muted),
            Span::raw(" "),
            Span::styled(TOGGLE_GLYPH, muted),
        ]))
        .render(controls, buf);

        if self.state.open {
            self.render_menu(area, buf);
        } else {
            self.menu_area = None;
            self.menu_inner = None;
        }
    }

    fn render_menu(&mut self, field: Rect, buf: &mut Buffer) {
        let visible: Vec<String> = self.state.visible().into_iter().map(str::to_string).collect();

        let rows = (visible.len().max(1) as u16).min(MAX_MENU_ROWS);
        let top = field.y + field.height;
        let bottom = buf.area.y + buf.area.height;
        let height = (rows + 2).min(bottom.saturating_sub(top));
        if height < 3 {
            self.menu_area = None;
            self.menu_inner = None;
            return;
        }

        let menu = Rect::new(field.x, top, field.width, height);
        Clear.render(menu, buf);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(menu);
        block.render(menu, buf);

        self.menu_area = Some(menu);
        self.menu_inner = Some(inner);

        if visible.is_empty() {
            Paragraph::new(EMPTY_MENU_TEXT)
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = visible.iter().map(|name| ListItem::new(name.as_str())).collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .highlight_symbol("› ");

        // Selecting the focused row makes the list scroll it into view
        self.list_state.select(self.state.focused.filter(|i| *i < visible.len()));
        StatefulWidget::render(list, inner, buf, &mut self.list_state);
    }
}

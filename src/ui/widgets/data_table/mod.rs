// src/ui/widgets/data_table/mod.rs

//! Table container: header row, then either a "No data" row, a loader row, or
//! the caller's rows.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Cell, Row, StatefulWidget, Table, TableState},
};

pub const NO_DATA_TEXT: &str = "No data";
const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub width: Constraint,
}

impl Column {
    pub const fn new(header: &'static str, width: Constraint) -> Self {
        Self { header, width }
    }
}

pub struct DataTable<'a> {
    columns: &'a [Column],
    rows: Vec<Row<'a>>,
    content_length: usize,
    is_loading: bool,
    spinner_frame: usize,
    block: Option<Block<'a>>,
}

impl<'a> DataTable<'a> {
    pub fn new(columns: &'a [Column]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            content_length: 0,
            is_loading: false,
            spinner_frame: 0,
            block: None,
        }
    }

    pub fn rows(mut self, rows: Vec<Row<'a>>) -> Self {
        self.content_length = rows.len();
        self.rows = rows;
        self
    }

    pub fn loading(mut self, is_loading: bool, spinner_frame: usize) -> Self {
        self.is_loading = is_loading;
        self.spinner_frame = spinner_frame;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn placeholder_row(&self, text: String) -> Row<'a> {
        // Spans the whole table by filling the first cell and leaving the rest blank
        let mut cells = vec![Cell::from(Text::from(Line::from(text).alignment(Alignment::Center)))];
        cells.extend((1..self.columns.len()).map(|_| Cell::from("")));
        Row::new(cells)
            .height(1)
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
    }
}

impl<'a> StatefulWidget for DataTable<'a> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(Text::from(Line::from(c.header).alignment(Alignment::Center)))),
        )
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

        let widths: Vec<Constraint> = self.columns.iter().map(|c| c.width).collect();

        let body = if self.content_length == 0 && !self.is_loading {
            state.select(None);
            vec![self.placeholder_row(NO_DATA_TEXT.to_string())]
        } else if self.is_loading {
            state.select(None);
            let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            vec![self.placeholder_row(format!("{} loading", frame))]
        } else {
            self.rows
        };

        let mut table = Table::new(body, widths)
            .header(header)
            .column_spacing(1);
        if let Some(block) = self.block {
            table = table.block(block);
        }

        StatefulWidget::render(table, area, buf, state);
    }
}

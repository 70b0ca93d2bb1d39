//! # List Panel Component
//!
//! Table view over a [`ListView`], with a one-line prompt for typing a
//! filter or an item number.
//!
//! Follows the persistent state pattern: the owning screen keeps the
//! `ListPanel` and forwards events to it.
//!
//! Keys in the idle state:
//! - `→`/`PgDn`, `←`/`PgUp`: change page
//! - `/`: start typing a filter, Enter applies it
//! - `Ctrl+L`: clear the filter
//! - digits: start typing an item number (pickers only)
//! - `Esc`: leave

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::listing::{Browse, ListMode, ListView, Searchable, Select};
use crate::core::model::{Agency, Customer, Vehicle};
use crate::core::rental::RentalDetails;
use crate::tui::event::TuiEvent;

/// How a record is laid out as a table row.
pub trait TableRow: Searchable {
    fn headers() -> &'static [&'static str];
    /// Column widths in cells, one per header.
    fn widths() -> &'static [u16];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Agency {
    fn headers() -> &'static [&'static str] {
        &["Name", "Address", "Phone"]
    }

    fn widths() -> &'static [u16] {
        &[22, 30, 16]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.address.clone(), self.phone.clone()]
    }
}

impl TableRow for Vehicle {
    fn headers() -> &'static [&'static str] {
        &["Plate", "Brand", "Model", "Daily rate", "Status"]
    }

    fn widths() -> &'static [u16] {
        &[9, 12, 14, 11, 12]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.plate.clone(),
            self.brand.clone(),
            self.model.clone(),
            self.daily_rate.to_string(),
            self.status.label().to_string(),
        ]
    }
}

impl TableRow for Customer {
    fn headers() -> &'static [&'static str] {
        &["Name", "Type", "Document", "Phone"]
    }

    fn widths() -> &'static [u16] {
        &[22, 13, 20, 16]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.label().to_string(),
            format!("{} {}", self.kind.document_label(), self.document),
            self.phone.clone(),
        ]
    }
}

impl TableRow for RentalDetails {
    fn headers() -> &'static [&'static str] {
        &["Plate", "Vehicle", "Customer", "Agency", "Start", "End", "Charge"]
    }

    fn widths() -> &'static [u16] {
        &[9, 16, 16, 14, 16, 16, 10]
    }

    fn cells(&self) -> Vec<String> {
        let format = |t: chrono::DateTime<chrono::Utc>| t.format("%Y-%m-%d %H:%M").to_string();
        vec![
            self.plate.clone(),
            self.vehicle.clone(),
            self.customer.clone(),
            self.agency.clone(),
            format(self.rental.start),
            self.rental.end().map(format).unwrap_or_else(|| "-".into()),
            self.rental
                .charge()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".into()),
        ]
    }
}

/// What the panel is collecting from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Idle,
    Filter(String),
    Ordinal(String),
}

/// Events emitted by the list panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<T> {
    Back,
    Chosen(T),
    /// Something to tell the operator (no matches, bad number).
    Notice(String),
}

pub struct ListPanel<T, M: ListMode = Browse> {
    list: ListView<T, M>,
    input: InputMode,
}

impl<T: TableRow + Clone, M: ListMode> ListPanel<T, M> {
    pub fn new(records: Vec<T>, page_size: usize) -> Self {
        Self {
            list: ListView::new(records, page_size),
            input: InputMode::Idle,
        }
    }

    pub fn reload(&mut self, records: Vec<T>) {
        self.list.reload(records);
    }

    #[cfg(test)]
    pub fn list(&self) -> &ListView<T, M> {
        &self.list
    }

    pub fn is_typing(&self) -> bool {
        self.input != InputMode::Idle
    }

    /// Events every mode handles the same way. `Err` hands the event back.
    fn handle_shared<'e>(
        &mut self,
        event: &'e TuiEvent,
    ) -> Result<Option<ListEvent<T>>, &'e TuiEvent> {
        if *event == TuiEvent::ClearFilter {
            self.input = InputMode::Idle;
            self.list.clear_filter();
            return Ok(None);
        }

        match &mut self.input {
            InputMode::Filter(query) => {
                match event {
                    TuiEvent::InputChar(c) => query.push(*c),
                    TuiEvent::Backspace => {
                        query.pop();
                    }
                    TuiEvent::Escape => self.input = InputMode::Idle,
                    TuiEvent::Submit => {
                        let query = std::mem::take(query);
                        self.input = InputMode::Idle;
                        if let Err(e) = self.list.apply_filter(&query) {
                            return Ok(Some(ListEvent::Notice(e.to_string())));
                        }
                    }
                    _ => {}
                }
                Ok(None)
            }
            InputMode::Ordinal(_) => Err(event),
            InputMode::Idle => match event {
                TuiEvent::NextPage => {
                    self.list.next_page();
                    Ok(None)
                }
                TuiEvent::PreviousPage => {
                    self.list.previous_page();
                    Ok(None)
                }
                TuiEvent::InputChar('/') => {
                    self.input = InputMode::Filter(String::new());
                    Ok(None)
                }
                TuiEvent::Escape => Ok(Some(ListEvent::Back)),
                _ => Err(event),
            },
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, hint: Option<&str>) {
        use Constraint::{Length, Min};
        let [table_area, footer_area, prompt_area] =
            Layout::vertical([Min(0), Length(1), Length(1)]).areas(area);

        let page = self.list.current_page();
        if page.is_empty() {
            frame.render_widget(
                Paragraph::new("No records.").style(Style::default().fg(Color::DarkGray)),
                table_area,
            );
        } else {
            let header = Row::new(
                std::iter::once("#")
                    .chain(T::headers().iter().copied())
                    .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
            )
            .style(Style::default().fg(Color::Yellow));

            let rows = page.iter().map(|(ordinal, record)| {
                let cells = record
                    .cells()
                    .into_iter()
                    .zip(T::widths())
                    .map(|(text, &width)| Cell::from(fit(&text, width as usize)));
                Row::new(std::iter::once(Cell::from(ordinal.to_string())).chain(cells))
            });

            let widths = std::iter::once(Constraint::Length(4))
                .chain(T::widths().iter().map(|&w| Constraint::Length(w)));
            let table = Table::new(rows, widths).header(header).column_spacing(1);
            frame.render_widget(table, table_area);
        }

        let mut footer = vec![Span::styled(
            format!(
                "Page {} of {} · {} records",
                page.index + 1,
                page.total_pages.max(1),
                self.list.len()
            ),
            Style::default().fg(Color::Gray),
        )];
        if let Some(filter) = self.list.filter() {
            footer.push(Span::styled(
                format!(" · filter: {filter}"),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(footer)), footer_area);

        let prompt = match &self.input {
            InputMode::Filter(query) => Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{query}▏")),
            ]),
            InputMode::Ordinal(digits) => Line::from(vec![
                Span::styled("Item #: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{digits}▏")),
            ]),
            InputMode::Idle => Line::styled(
                hint.unwrap_or_default().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(prompt), prompt_area);
    }
}

impl<T: TableRow + Clone> ListPanel<T, Browse> {
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent<T>> {
        self.handle_shared(event).unwrap_or(None)
    }
}

impl<T: TableRow + Clone> ListPanel<T, Select> {
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent<T>> {
        let event = match self.handle_shared(event) {
            Ok(result) => return result,
            Err(event) => event,
        };

        match (&mut self.input, event) {
            (InputMode::Idle, TuiEvent::InputChar(c)) if c.is_ascii_digit() => {
                self.input = InputMode::Ordinal(c.to_string());
                None
            }
            (InputMode::Ordinal(digits), TuiEvent::InputChar(c)) if c.is_ascii_digit() => {
                digits.push(*c);
                None
            }
            (InputMode::Ordinal(digits), TuiEvent::Backspace) => {
                digits.pop();
                if digits.is_empty() {
                    self.input = InputMode::Idle;
                }
                None
            }
            (InputMode::Ordinal(_), TuiEvent::Escape) => {
                self.input = InputMode::Idle;
                None
            }
            (InputMode::Ordinal(digits), TuiEvent::Submit) => {
                let digits = std::mem::take(digits);
                self.input = InputMode::Idle;
                let Ok(ordinal) = digits.parse::<usize>() else {
                    return Some(ListEvent::Notice(format!(
                        "no item {digits}: choose between 1 and {}",
                        self.list.len()
                    )));
                };
                match self.list.select_by_ordinal(ordinal) {
                    Ok(record) => Some(ListEvent::Chosen(record.clone())),
                    Err(e) => Some(ListEvent::Notice(e.to_string())),
                }
            }
            _ => None,
        }
    }
}

/// Truncate `text` to `width` display cells, ending in "…" when cut.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

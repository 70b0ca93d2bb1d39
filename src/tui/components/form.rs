//! # Form Component
//!
//! Field-by-field data entry followed by a confirmation step.
//!
//! ```text
//! field 1 ─Enter─► field 2 ─Enter─► … ─Enter─► confirm ─Enter─► Submitted
//!    ▲  └Esc (empty)─► Cancelled      ◄─Esc──────┘
//!    └──────── Backspace on an empty field ◄──┘
//! ```
//!
//! The form only collects text. The owning screen reads the values on
//! `Submitted`, validates them through the engine and calls
//! [`FormState::reopen`] if the operator has to fix something.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::tui::event::TuiEvent;

#[derive(Debug, Clone)]
enum Field {
    Text {
        label: &'static str,
        value: String,
    },
    /// One of a fixed set, cycled with the arrow keys.
    Choice {
        label: &'static str,
        options: &'static [&'static str],
        selected: usize,
    },
}

impl Field {
    fn label(&self) -> &'static str {
        match self {
            Field::Text { label, .. } | Field::Choice { label, .. } => *label,
        }
    }

    fn display(&self) -> &str {
        match self {
            Field::Text { value, .. } => value,
            Field::Choice {
                options, selected, ..
            } => options[*selected],
        }
    }
}

/// Events emitted by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submitted,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<Field>,
    focus: usize,
    confirming: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            focus: 0,
            confirming: false,
        }
    }

    pub fn text(mut self, label: &'static str) -> Self {
        self.fields.push(Field::Text {
            label,
            value: String::new(),
        });
        self
    }

    pub fn choice(mut self, label: &'static str, options: &'static [&'static str]) -> Self {
        assert!(!options.is_empty(), "choice field {label} has no options");
        self.fields.push(Field::Choice {
            label,
            options,
            selected: 0,
        });
        self
    }

    /// Text of field `index`; for a choice field, the selected option.
    pub fn value(&self, index: usize) -> &str {
        self.fields[index].display()
    }

    /// Selected option index of choice field `index`.
    pub fn selected(&self, index: usize) -> usize {
        match &self.fields[index] {
            Field::Choice { selected, .. } => *selected,
            Field::Text { .. } => 0,
        }
    }

    /// First text field that is empty or whitespace.
    pub fn first_blank(&self) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| matches!(f, Field::Text { value, .. } if value.trim().is_empty()))
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Leave the confirmation step and put the cursor on `field`.
    pub fn reopen(&mut self, field: usize) {
        self.confirming = false;
        self.focus = field.min(self.fields.len().saturating_sub(1));
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        if self.confirming {
            return match event {
                TuiEvent::Submit | TuiEvent::InputChar('y' | 'Y') => Some(FormEvent::Submitted),
                TuiEvent::Escape | TuiEvent::InputChar('n' | 'N') | TuiEvent::Backspace => {
                    self.confirming = false;
                    None
                }
                _ => None,
            };
        }

        let last = self.fields.len().saturating_sub(1);
        let field = self.fields.get_mut(self.focus)?;
        match (field, event) {
            (_, TuiEvent::Submit) => {
                if self.focus == last {
                    self.confirming = true;
                } else {
                    self.focus += 1;
                }
                None
            }
            (Field::Text { value, .. }, TuiEvent::Escape) if !value.is_empty() => {
                value.clear();
                None
            }
            (_, TuiEvent::Escape) if self.focus == 0 => Some(FormEvent::Cancelled),
            (_, TuiEvent::Escape) | (Field::Choice { .. }, TuiEvent::Backspace) => {
                self.focus = self.focus.saturating_sub(1);
                None
            }
            (Field::Text { value, .. }, TuiEvent::Backspace) => {
                if value.pop().is_none() {
                    self.focus = self.focus.saturating_sub(1);
                }
                None
            }
            (Field::Text { value, .. }, TuiEvent::InputChar(c)) => {
                value.push(*c);
                None
            }
            (
                Field::Choice {
                    options, selected, ..
                },
                TuiEvent::NextPage | TuiEvent::CursorDown | TuiEvent::InputChar(' '),
            ) => {
                *selected = (*selected + 1) % options.len();
                None
            }
            (
                Field::Choice {
                    options, selected, ..
                },
                TuiEvent::PreviousPage | TuiEvent::CursorUp,
            ) => {
                *selected = (*selected + options.len() - 1) % options.len();
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, summary: &[String]) {
        let label_width = self
            .fields
            .iter()
            .map(|f| f.label().len())
            .max()
            .unwrap_or(0);

        let mut lines: Vec<Line> = summary
            .iter()
            .map(|s| Line::styled(s.clone(), Style::default().fg(Color::Gray)))
            .collect();
        if !lines.is_empty() {
            lines.push(Line::default());
        }

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus && !self.confirming;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let value = match field {
                Field::Choice { .. } if focused => format!("◂ {} ▸", field.display()),
                _ if focused => format!("{}▏", field.display()),
                _ => field.display().to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>label_width$}: ", field.label()), label_style),
                Span::styled(value, Style::default().fg(Color::White)),
            ]));
        }

        if self.confirming {
            lines.push(Line::default());
            lines.push(Line::styled(
                "Save? Enter/y to confirm, Esc/n to edit",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }

        let body = Paragraph::new(lines).block(Block::default().padding(Padding::uniform(1)));
        frame.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new()
            .choice("Type", &["Individual", "Legal entity"])
            .text("Name")
            .text("Phone")
    }

    fn type_text(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_enter_walks_fields_then_confirms() {
        let mut form = form();
        form.handle_event(&TuiEvent::CursorDown);
        form.handle_event(&TuiEvent::Submit);
        type_text(&mut form, "Acme");
        form.handle_event(&TuiEvent::Submit);
        type_text(&mut form, "555-0100");
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert!(form.is_confirming());
        assert_eq!(form.handle_event(&TuiEvent::Submit), Some(FormEvent::Submitted));

        assert_eq!(form.value(0), "Legal entity");
        assert_eq!(form.selected(0), 1);
        assert_eq!(form.value(1), "Acme");
        assert_eq!(form.value(2), "555-0100");
    }

    #[test]
    fn test_escape_on_first_field_cancels() {
        let mut form = form();
        assert_eq!(form.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancelled));
    }

    #[test]
    fn test_escape_clears_before_going_back() {
        let mut form = form();
        form.handle_event(&TuiEvent::Submit);
        type_text(&mut form, "Ana");
        assert_eq!(form.handle_event(&TuiEvent::Escape), None);
        assert_eq!(form.value(1), "");
        assert_eq!(form.focus(), 1);
        form.handle_event(&TuiEvent::Escape);
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_backspace_on_empty_field_returns_to_previous() {
        let mut form = form();
        form.handle_event(&TuiEvent::Submit);
        type_text(&mut form, "Al");
        form.handle_event(&TuiEvent::Submit);
        assert_eq!(form.focus(), 2);

        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.focus(), 1);
        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.value(1), "A");
    }

    #[test]
    fn test_confirmation_can_be_declined() {
        let mut form = form();
        for _ in 0..3 {
            form.handle_event(&TuiEvent::Submit);
        }
        assert!(form.is_confirming());
        assert_eq!(form.handle_event(&TuiEvent::InputChar('n')), None);
        assert!(!form.is_confirming());
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn test_choice_wraps_both_ways() {
        let mut form = form();
        form.handle_event(&TuiEvent::CursorUp);
        assert_eq!(form.value(0), "Legal entity");
        form.handle_event(&TuiEvent::NextPage);
        assert_eq!(form.value(0), "Individual");
    }

    #[test]
    fn test_reopen_moves_focus() {
        let mut form = form();
        for _ in 0..3 {
            form.handle_event(&TuiEvent::Submit);
        }
        assert_eq!(form.first_blank(), Some(1));
        form.reopen(1);
        assert!(!form.is_confirming());
        assert_eq!(form.focus(), 1);
    }
}

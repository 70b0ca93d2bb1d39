//! # Menu Component
//!
//! Numbered option list. Options are chosen with the arrow keys + Enter, or
//! directly by their number. `0` or Esc leaves the menu.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Padding};

use crate::tui::event::TuiEvent;

pub struct MenuState {
    options: &'static [&'static str],
    list_state: ListState,
}

/// Events emitted by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Index into the option list.
    Chosen(usize),
    Back,
}

impl MenuState {
    pub fn new(options: &'static [&'static str]) -> Self {
        let mut list_state = ListState::default();
        if !options.is_empty() {
            list_state.select(Some(0));
        }
        Self { options, list_state }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('0') => Some(MenuEvent::Back),
            TuiEvent::CursorUp => {
                let current = self.selected().unwrap_or(0);
                self.list_state.select(Some(current.saturating_sub(1)));
                None
            }
            TuiEvent::CursorDown => {
                if !self.options.is_empty() {
                    let current = self.selected().unwrap_or(0);
                    self.list_state
                        .select(Some((current + 1).min(self.options.len() - 1)));
                }
                None
            }
            TuiEvent::Submit => self.selected().map(MenuEvent::Chosen),
            TuiEvent::InputChar(c) => {
                let n = c.to_digit(10)? as usize;
                (1..=self.options.len())
                    .contains(&n)
                    .then_some(MenuEvent::Chosen(n - 1))
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let selected = self.selected();
        let mut items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let style = if Some(i) == selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(format!("[ {} ] - {}", i + 1, label), style))
            })
            .collect();
        items.push(ListItem::new(Line::styled(
            "[ 0 ] - Back",
            Style::default().fg(Color::DarkGray),
        )));

        let list = List::new(items).block(Block::default().padding(Padding::uniform(1)));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[&str] = &["New rental", "Close rental", "Open rentals"];

    #[test]
    fn test_number_keys_choose_directly() {
        let mut menu = MenuState::new(OPTIONS);
        assert_eq!(menu.handle_event(&TuiEvent::InputChar('2')), Some(MenuEvent::Chosen(1)));
        assert_eq!(menu.handle_event(&TuiEvent::InputChar('4')), None);
        assert_eq!(menu.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut menu = MenuState::new(OPTIONS);
        menu.handle_event(&TuiEvent::CursorUp);
        assert_eq!(menu.selected(), Some(0));
        for _ in 0..5 {
            menu.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(menu.handle_event(&TuiEvent::Submit), Some(MenuEvent::Chosen(2)));
    }

    #[test]
    fn test_zero_and_escape_go_back() {
        let mut menu = MenuState::new(OPTIONS);
        assert_eq!(menu.handle_event(&TuiEvent::InputChar('0')), Some(MenuEvent::Back));
        assert_eq!(menu.handle_event(&TuiEvent::Escape), Some(MenuEvent::Back));
    }
}

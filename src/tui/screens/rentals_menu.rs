use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::flow::Transition;
use crate::core::state::App;
use crate::tui::component::{Nav, View};
use crate::tui::components::{MenuEvent, MenuState};
use crate::tui::event::TuiEvent;

use super::{CloseRental, NewRental, RecordList};

const OPTIONS: &[&str] = &[
    "New rental",
    "Close rental",
    "Open rentals",
    "Closed rentals",
    "Back",
];

pub struct RentalsMenu {
    menu: MenuState,
}

impl Default for RentalsMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl RentalsMenu {
    pub fn new() -> Self {
        Self {
            menu: MenuState::new(OPTIONS),
        }
    }
}

impl View for RentalsMenu {
    fn name(&self) -> &str {
        "rentals-menu"
    }

    fn title(&self) -> String {
        "Rentals".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        self.menu.render(frame, area);
    }

    fn help(&self) -> &'static str {
        "↑↓ Move  Enter/1-5 Choose  Esc Back"
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        let choice = match self.menu.handle_event(event)? {
            MenuEvent::Back => return Some(Transition::Back),
            MenuEvent::Chosen(choice) => choice,
        };
        Some(match choice {
            0 => Transition::Push(Box::new(NewRental::new(app))),
            1 => Transition::Push(Box::new(CloseRental::new(app))),
            2 => Transition::Push(Box::new(RecordList::open_rentals(app))),
            3 => Transition::Push(Box::new(RecordList::closed_rentals(app))),
            _ => Transition::Back,
        })
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::flow::Transition;
use crate::core::state::App;
use crate::tui::component::{Nav, View};
use crate::tui::components::{MenuEvent, MenuState};
use crate::tui::event::TuiEvent;

use super::{Fleet, NewAgency, NewCustomer, NewVehicle, RecordList, RentalsMenu};

const OPTIONS: &[&str] = &[
    "Agencies",
    "Vehicles",
    "Customers",
    "New customer",
    "New agency",
    "New vehicle",
    "Rentals",
    "Quit",
];

pub struct MainMenu {
    menu: MenuState,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            menu: MenuState::new(OPTIONS),
        }
    }
}

impl View for MainMenu {
    fn name(&self) -> &str {
        "main-menu"
    }

    fn title(&self) -> String {
        "Main menu".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        self.menu.render(frame, area);
    }

    fn help(&self) -> &'static str {
        "↑↓ Move  Enter/1-8 Choose  Esc Quit"
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        let choice = match self.menu.handle_event(event)? {
            MenuEvent::Back => return Some(Transition::Quit),
            MenuEvent::Chosen(choice) => choice,
        };
        Some(match choice {
            0 => Transition::Push(Box::new(RecordList::agencies(app))),
            1 => Transition::Push(Box::new(Fleet::new(app))),
            2 => Transition::Push(Box::new(RecordList::customers(app))),
            3 => Transition::Push(Box::new(NewCustomer::new())),
            4 => Transition::Push(Box::new(NewAgency::new())),
            5 => Transition::Push(Box::new(NewVehicle::new(app))),
            6 => Transition::Push(Box::new(RentalsMenu::new())),
            _ => Transition::Quit,
        })
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::flow::Transition;
use crate::core::model::{Agency, Customer, RentalStatus};
use crate::core::rental::RentalDetails;
use crate::core::state::App;
use crate::core::store::RecordStore;
use crate::tui::component::{Nav, View};
use crate::tui::components::{ListEvent, ListPanel, TableRow};
use crate::tui::event::TuiEvent;

/// Read-only, paged listing of one kind of record.
pub struct RecordList<T> {
    name: &'static str,
    title: &'static str,
    load: fn(&App) -> Vec<T>,
    panel: ListPanel<T>,
}

impl<T: TableRow + Clone> RecordList<T> {
    fn new(name: &'static str, title: &'static str, load: fn(&App) -> Vec<T>, app: &App) -> Self {
        Self {
            name,
            title,
            load,
            panel: ListPanel::new(load(app), app.page_size),
        }
    }

    #[cfg(test)]
    pub fn panel(&self) -> &ListPanel<T> {
        &self.panel
    }
}

impl RecordList<Agency> {
    pub fn agencies(app: &App) -> Self {
        Self::new("agencies", "Agencies", |app| app.engine.store().agencies(), app)
    }
}

impl RecordList<Customer> {
    pub fn customers(app: &App) -> Self {
        Self::new("customers", "Customers", |app| app.engine.store().customers(), app)
    }
}

impl RecordList<RentalDetails> {
    /// Open rentals, oldest first.
    pub fn open_rentals(app: &App) -> Self {
        Self::new(
            "open-rentals",
            "Open rentals",
            |app| {
                let rentals = app
                    .engine
                    .list_rentals_by(RentalStatus::Open, |a, b| a.start.cmp(&b.start));
                app.engine.describe(rentals)
            },
            app,
        )
    }

    /// Closed rentals, most recently returned first.
    pub fn closed_rentals(app: &App) -> Self {
        Self::new(
            "closed-rentals",
            "Closed rentals",
            |app| {
                let rentals = app
                    .engine
                    .list_rentals_by(RentalStatus::Closed, |a, b| b.end().cmp(&a.end()));
                app.engine.describe(rentals)
            },
            app,
        )
    }
}

impl<T: TableRow + Clone> View for RecordList<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> String {
        self.title.to_string()
    }

    fn on_enter(&mut self, app: &mut App) {
        self.panel.reload((self.load)(app));
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        self.panel.render(frame, area, None);
    }

    fn help(&self) -> &'static str {
        if self.panel.is_typing() {
            "Enter Apply  Esc Cancel"
        } else {
            "←→ Page  / Filter  Ctrl+L Clear filter  Esc Back"
        }
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        match self.panel.handle_event(event)? {
            ListEvent::Back => Some(Transition::Back),
            ListEvent::Notice(message) => {
                app.notify(message);
                None
            }
            ListEvent::Chosen(_) => None,
        }
    }
}

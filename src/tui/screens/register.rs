//! Registration screens: one form per record kind.
//!
//! The forms collect raw text; the catalog validates it. When the catalog
//! refuses (blank field, duplicate plate), the error goes to the status line
//! and the form reopens on the first blank field, or the first field when
//! nothing is blank.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::error::RentalError;
use crate::core::flow::Transition;
use crate::core::listing::Select;
use crate::core::model::{Agency, CustomerKind, Money};
use crate::core::state::App;
use crate::core::store::RecordStore;
use crate::tui::component::{Nav, View};
use crate::tui::components::{FormEvent, FormState, ListEvent, ListPanel};
use crate::tui::event::TuiEvent;

const FORM_HELP: &str = "Enter Next  Backspace Edit/Previous  Esc Clear/Cancel";

/// Route a finished form to `save`. `Ok(label)` pops the screen with a status.
fn submit(
    form: &mut FormState,
    app: &mut App,
    event: &TuiEvent,
    save: impl FnOnce(&FormState, &mut App) -> Result<String, RentalError>,
) -> Option<Nav> {
    match form.handle_event(event)? {
        FormEvent::Cancelled => Some(Transition::Back),
        FormEvent::Submitted => match save(form, app) {
            Ok(message) => {
                app.notify(message);
                Some(Transition::Back)
            }
            Err(e) => {
                app.notify(e.to_string());
                form.reopen(form.first_blank().unwrap_or(0));
                None
            }
        },
    }
}

pub struct NewAgency {
    form: FormState,
}

impl Default for NewAgency {
    fn default() -> Self {
        Self::new()
    }
}

impl NewAgency {
    pub fn new() -> Self {
        Self {
            form: FormState::new().text("Name").text("Address").text("Phone"),
        }
    }
}

impl View for NewAgency {
    fn name(&self) -> &str {
        "new-agency"
    }

    fn title(&self) -> String {
        "New agency".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        self.form.render(frame, area, &[]);
    }

    fn help(&self) -> &'static str {
        FORM_HELP
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        submit(&mut self.form, app, event, |form, app| {
            let agency = app
                .engine
                .catalog()
                .create_agency(form.value(0), form.value(1), form.value(2))?;
            Ok(format!("Agency {} registered", agency.name))
        })
    }
}

const KIND_OPTIONS: &[&str] = &["Individual", "Legal entity"];

pub struct NewCustomer {
    form: FormState,
}

impl Default for NewCustomer {
    fn default() -> Self {
        Self::new()
    }
}

impl NewCustomer {
    pub fn new() -> Self {
        Self {
            form: FormState::new()
                .choice("Type", KIND_OPTIONS)
                .text("Name")
                .text("Phone")
                .text("Document"),
        }
    }

    fn kind(&self) -> CustomerKind {
        CustomerKind::ALL[self.form.selected(0)]
    }
}

impl View for NewCustomer {
    fn name(&self) -> &str {
        "new-customer"
    }

    fn title(&self) -> String {
        "New customer".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        let kind = self.kind();
        let summary = [format!(
            "Document: {} for {} customers (←→ changes the type)",
            kind.document_label(),
            kind.label().to_lowercase()
        )];
        self.form.render(frame, area, &summary);
    }

    fn help(&self) -> &'static str {
        FORM_HELP
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        let kind = self.kind();
        submit(&mut self.form, app, event, |form, app| {
            let customer = app.engine.catalog().create_customer(
                kind,
                form.value(1),
                form.value(2),
                form.value(3),
            )?;
            Ok(format!(
                "Customer {} registered ({} {})",
                customer.name,
                kind.document_label(),
                customer.document
            ))
        })
    }
}

/// Pick the owning agency first, then fill in the vehicle.
pub struct NewVehicle {
    agencies: ListPanel<Agency, Select>,
    agency: Option<Agency>,
    form: FormState,
}

impl NewVehicle {
    pub fn new(app: &App) -> Self {
        Self {
            agencies: ListPanel::new(app.engine.store().agencies(), app.page_size),
            agency: None,
            form: FormState::new()
                .text("Plate")
                .text("Brand")
                .text("Model")
                .text("Daily rate"),
        }
    }
}

impl View for NewVehicle {
    fn name(&self) -> &str {
        "new-vehicle"
    }

    fn title(&self) -> String {
        match &self.agency {
            None => "New vehicle › choose agency".to_string(),
            Some(agency) => format!("New vehicle › {}", agency.name),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        match &self.agency {
            None => self
                .agencies
                .render(frame, area, Some("Type a number and Enter to pick")),
            Some(agency) => {
                let summary = [
                    format!("Agency: {}", agency.name),
                    "Daily rate as 123.45".to_string(),
                ];
                self.form.render(frame, area, &summary);
            }
        }
    }

    fn help(&self) -> &'static str {
        match self.agency {
            None => "←→ Page  / Filter  0-9 Enter Pick  Esc Back",
            Some(_) => FORM_HELP,
        }
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        let Some(agency_id) = self.agency.as_ref().map(|a| a.id) else {
            match self.agencies.handle_event(event)? {
                ListEvent::Back => return Some(Transition::Back),
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(agency) => self.agency = Some(agency),
            }
            return None;
        };

        if self.form.focus() == 0
            && self.form.value(0).is_empty()
            && !self.form.is_confirming()
            && *event == TuiEvent::Escape
        {
            self.agency = None;
            return None;
        }

        let rate_field = 3;
        let rate = Money::parse(self.form.value(rate_field));
        if rate.is_none() && self.form.is_confirming() && *event == TuiEvent::Submit {
            app.notify(format!(
                "\"{}\" is not a valid daily rate",
                self.form.value(rate_field)
            ));
            self.form.reopen(rate_field);
            return None;
        }

        submit(&mut self.form, app, event, |form, app| {
            let vehicle = app.engine.catalog().create_vehicle(
                form.value(0),
                form.value(2),
                form.value(1),
                agency_id,
                rate.unwrap_or_default(),
            )?;
            Ok(format!(
                "Vehicle {} registered at {}",
                vehicle.plate, vehicle.daily_rate
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VehicleStatus;
    use crate::test_support::test_app;

    fn fill(screen: &mut dyn View, app: &mut App, fields: &[&str]) -> Option<Nav> {
        let mut nav = None;
        for field in fields {
            for c in field.chars() {
                screen.handle_event(&TuiEvent::InputChar(c), app);
            }
            nav = screen.handle_event(&TuiEvent::Submit, app);
        }
        nav
    }

    #[test]
    fn test_new_agency_is_saved() {
        let mut app = test_app();
        let mut screen = NewAgency::new();
        assert!(fill(&mut screen, &mut app, &["Airport", "Terminal 1", "555-0101"]).is_none());
        let nav = screen.handle_event(&TuiEvent::Submit, &mut app);

        assert!(matches!(nav, Some(Transition::Back)));
        assert!(app.status_message.contains("Airport"));
        assert_eq!(app.engine.store().agencies().len(), 2);
    }

    #[test]
    fn test_blank_field_reopens_form() {
        let mut app = test_app();
        let mut screen = NewAgency::new();
        fill(&mut screen, &mut app, &["Airport", "", "555-0101"]);
        assert!(screen.handle_event(&TuiEvent::Submit, &mut app).is_none());

        assert!(app.status_message.contains("required"));
        assert!(!screen.form.is_confirming());
        assert_eq!(screen.form.focus(), 1);
        assert_eq!(app.engine.store().agencies().len(), 1);
    }

    #[test]
    fn test_escape_on_empty_form_cancels() {
        let mut app = test_app();
        let mut screen = NewAgency::new();
        assert!(matches!(
            screen.handle_event(&TuiEvent::Escape, &mut app),
            Some(Transition::Back)
        ));
    }

    #[test]
    fn test_new_legal_entity_customer() {
        let mut app = test_app();
        let mut screen = NewCustomer::new();
        screen.handle_event(&TuiEvent::NextPage, &mut app);
        fill(
            &mut screen,
            &mut app,
            &["", "Acme Ltda", "555-0199", "12.345.678/0001-90"],
        );
        let nav = screen.handle_event(&TuiEvent::Submit, &mut app);

        assert!(matches!(nav, Some(Transition::Back)));
        assert!(app.status_message.contains("CNPJ"));
        let acme = app
            .engine
            .store()
            .customers()
            .into_iter()
            .find(|c| c.name == "Acme Ltda")
            .unwrap();
        assert_eq!(acme.kind, CustomerKind::LegalEntity);
    }

    #[test]
    fn test_new_vehicle_after_choosing_agency() {
        let mut app = test_app();
        let mut screen = NewVehicle::new(&app);
        screen.handle_event(&TuiEvent::InputChar('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);
        assert!(screen.title().contains("Downtown"));

        fill(&mut screen, &mut app, &["xyz9k87", "Fiat", "Uno", "89,90"]);
        let nav = screen.handle_event(&TuiEvent::Submit, &mut app);
        assert!(matches!(nav, Some(Transition::Back)));

        let vehicle = app
            .engine
            .catalog()
            .find_vehicle_by_plate("XYZ9K87")
            .unwrap();
        assert_eq!(vehicle.brand, "Fiat");
        assert_eq!(vehicle.model, "Uno");
        assert_eq!(vehicle.daily_rate, Money::from_cents(8990));
        assert_eq!(vehicle.status, VehicleStatus::Available);
    }

    #[test]
    fn test_invalid_rate_reopens_rate_field() {
        let mut app = test_app();
        let mut screen = NewVehicle::new(&app);
        screen.handle_event(&TuiEvent::InputChar('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);

        fill(&mut screen, &mut app, &["XYZ9K87", "Fiat", "Uno", "cheap"]);
        assert!(screen.handle_event(&TuiEvent::Submit, &mut app).is_none());
        assert!(app.status_message.contains("cheap"));
        assert_eq!(screen.form.focus(), 3);
        assert_eq!(app.engine.store().vehicles().len(), 1);
    }

    #[test]
    fn test_duplicate_plate_is_reported() {
        let mut app = test_app();
        let mut screen = NewVehicle::new(&app);
        screen.handle_event(&TuiEvent::InputChar('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);

        fill(&mut screen, &mut app, &["abc1d23", "Fiat", "Uno", "50"]);
        assert!(screen.handle_event(&TuiEvent::Submit, &mut app).is_none());
        assert!(app.status_message.contains("already registered"));
    }

    #[test]
    fn test_escape_returns_to_agency_choice() {
        let mut app = test_app();
        let mut screen = NewVehicle::new(&app);
        screen.handle_event(&TuiEvent::InputChar('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);

        assert!(screen.handle_event(&TuiEvent::Escape, &mut app).is_none());
        assert!(screen.title().contains("choose agency"));
        assert!(matches!(
            screen.handle_event(&TuiEvent::Escape, &mut app),
            Some(Transition::Back)
        ));
    }
}

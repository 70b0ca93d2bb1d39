//! Vehicle administration: browse the fleet, open one vehicle, then take
//! it out of service, bring it back, or delete it.
//!
//! Only the AVAILABLE⇄UNAVAILABLE edge is touched here. The catalog refuses
//! both actions on a rented vehicle and the refusal goes to the status line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::flow::Transition;
use crate::core::listing::Select;
use crate::core::model::{Vehicle, VehicleStatus};
use crate::core::state::App;
use crate::core::store::RecordStore;
use crate::tui::component::{Nav, View};
use crate::tui::components::{ListEvent, ListPanel};
use crate::tui::event::TuiEvent;

/// One vehicle with its agency, as shown on the detail step.
struct Card {
    vehicle: Vehicle,
    agency: String,
    fleet_size: usize,
}

enum Step {
    Pick,
    Detail(Card),
    ConfirmDelete(Card),
}

pub struct Fleet {
    panel: ListPanel<Vehicle, Select>,
    step: Step,
}

impl Fleet {
    pub fn new(app: &App) -> Self {
        Self {
            panel: ListPanel::new(app.engine.store().vehicles(), app.page_size),
            step: Step::Pick,
        }
    }

    fn card(vehicle: Vehicle, app: &mut App) -> Card {
        let agency = app
            .engine
            .store()
            .agency(vehicle.agency_id)
            .map(|a| a.name)
            .unwrap_or_else(|| "?".to_string());
        let fleet_size = app
            .engine
            .catalog()
            .find_vehicles_by_agency(vehicle.agency_id)
            .len();
        Card {
            vehicle,
            agency,
            fleet_size,
        }
    }

    fn back_to_list(&mut self, app: &App) {
        self.panel.reload(app.engine.store().vehicles());
        self.step = Step::Pick;
    }

    /// Flip the maintenance flag. Rented vehicles are refused by the catalog.
    fn toggle_service(&mut self, card: Card, app: &mut App) {
        let id = card.vehicle.id;
        let mut catalog = app.engine.catalog();
        let result = match card.vehicle.status {
            VehicleStatus::Unavailable => catalog.set_vehicle_available(id),
            _ => catalog.set_vehicle_unavailable(id),
        };
        match result {
            Ok(vehicle) => {
                app.notify(format!("Vehicle {} is now {}", vehicle.plate, vehicle.status));
                self.step = Step::Detail(Card { vehicle, ..card });
            }
            Err(e) => {
                app.notify(e.to_string());
                self.step = Step::Detail(card);
            }
        }
    }

    fn delete(&mut self, card: Card, app: &mut App) {
        match app.engine.catalog().delete_vehicle(card.vehicle.id) {
            Ok(deleted) => {
                app.notify(format!("Vehicle {} deleted", deleted.plate));
                self.back_to_list(app);
            }
            Err(e) => {
                app.notify(e.to_string());
                self.step = Step::Detail(card);
            }
        }
    }

    fn detail_lines(card: &Card) -> Vec<Line<'static>> {
        let Card {
            vehicle,
            agency,
            fleet_size,
        } = card;
        let status_color = match vehicle.status {
            VehicleStatus::Available => Color::Green,
            VehicleStatus::Rented => Color::Yellow,
            VehicleStatus::Unavailable => Color::Red,
        };
        vec![
            Line::from(format!("Plate:      {}", vehicle.plate)),
            Line::from(format!("Vehicle:    {} {}", vehicle.brand, vehicle.model)),
            Line::from(format!("Agency:     {agency} ({fleet_size} vehicles)")),
            Line::from(format!("Daily rate: {}", vehicle.daily_rate)),
            Line::styled(
                format!("Status:     {}", vehicle.status),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]
    }
}

impl View for Fleet {
    fn name(&self) -> &str {
        "vehicles"
    }

    fn title(&self) -> String {
        match &self.step {
            Step::Pick => "Vehicles".to_string(),
            Step::Detail(c) => format!("Vehicles › {}", c.vehicle.plate),
            Step::ConfirmDelete(c) => format!("Vehicles › {} › delete", c.vehicle.plate),
        }
    }

    fn on_enter(&mut self, app: &mut App) {
        if matches!(self.step, Step::Pick) {
            self.panel.reload(app.engine.store().vehicles());
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        let (card, prompt) = match &self.step {
            Step::Pick => {
                self.panel
                    .render(frame, area, Some("Type a number and Enter to open a vehicle"));
                return;
            }
            Step::Detail(c) => (c, "m Toggle maintenance  d Delete  Esc Back to list"),
            Step::ConfirmDelete(c) => (c, "Delete this vehicle? Enter/y to confirm, Esc/n to keep it"),
        };
        let mut lines = Self::detail_lines(card);
        lines.push(Line::default());
        lines.push(Line::styled(prompt, Style::default().fg(Color::Yellow)));
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().padding(Padding::uniform(1))),
            area,
        );
    }

    fn help(&self) -> &'static str {
        match self.step {
            Step::Pick if self.panel.is_typing() => "Enter Apply  Esc Cancel",
            Step::Pick => "←→ Page  / Filter  0-9 Enter Open  Esc Back",
            Step::Detail(_) => "m Maintenance  d Delete  Esc List",
            Step::ConfirmDelete(_) => "Enter Delete  Esc Keep",
        }
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        match std::mem::replace(&mut self.step, Step::Pick) {
            Step::Pick => match self.panel.handle_event(event)? {
                ListEvent::Back => return Some(Transition::Back),
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(vehicle) => self.step = Step::Detail(Self::card(vehicle, app)),
            },
            Step::Detail(card) => match event {
                TuiEvent::InputChar('m' | 'M') => self.toggle_service(card, app),
                TuiEvent::InputChar('d' | 'D') => self.step = Step::ConfirmDelete(card),
                TuiEvent::Escape => self.back_to_list(app),
                _ => self.step = Step::Detail(card),
            },
            Step::ConfirmDelete(card) => match event {
                TuiEvent::Submit | TuiEvent::InputChar('y' | 'Y') => self.delete(card, app),
                TuiEvent::Escape | TuiEvent::InputChar('n' | 'N') => {
                    self.step = Step::Detail(card)
                }
                _ => self.step = Step::ConfirmDelete(card),
            },
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RentalError;
    use crate::test_support::{t0, test_app};
    use chrono::Duration;

    fn key(c: char) -> TuiEvent {
        TuiEvent::InputChar(c)
    }

    fn open_first(screen: &mut Fleet, app: &mut App) {
        screen.handle_event(&key('1'), app);
        screen.handle_event(&TuiEvent::Submit, app);
        assert!(matches!(screen.step, Step::Detail(_)), "{}", app.status_message);
    }

    fn status_of_first(app: &App) -> VehicleStatus {
        app.engine.store().vehicles()[0].status
    }

    #[test]
    fn test_maintenance_toggle_blocks_and_restores_renting() {
        let mut app = test_app();
        let mut screen = Fleet::new(&app);
        open_first(&mut screen, &mut app);

        screen.handle_event(&key('m'), &mut app);
        assert_eq!(status_of_first(&app), VehicleStatus::Unavailable);
        assert!(app.status_message.contains("unavailable"));

        let vehicle = app.engine.store().vehicles().remove(0);
        let customer = app.engine.store().customers().remove(0);
        let err = app
            .engine
            .open_rental(vehicle.id, customer.id, vehicle.agency_id, t0())
            .unwrap_err();
        assert!(matches!(
            err,
            RentalError::VehicleUnavailable {
                status: VehicleStatus::Unavailable,
                ..
            }
        ));

        screen.handle_event(&key('m'), &mut app);
        assert_eq!(status_of_first(&app), VehicleStatus::Available);
    }

    #[test]
    fn test_rented_vehicle_toggle_is_refused() {
        let mut app = test_app();
        let vehicle = app.engine.store().vehicles().remove(0);
        let customer = app.engine.store().customers().remove(0);
        app.engine
            .open_rental(vehicle.id, customer.id, vehicle.agency_id, t0())
            .unwrap();

        let mut screen = Fleet::new(&app);
        open_first(&mut screen, &mut app);
        screen.handle_event(&key('m'), &mut app);

        assert!(app.status_message.contains("currently rented"));
        assert_eq!(status_of_first(&app), VehicleStatus::Rented);
        assert!(matches!(screen.step, Step::Detail(_)));
    }

    #[test]
    fn test_delete_after_confirmation() {
        let mut app = test_app();
        let mut screen = Fleet::new(&app);
        open_first(&mut screen, &mut app);

        screen.handle_event(&key('d'), &mut app);
        assert!(screen.title().ends_with("delete"));
        screen.handle_event(&key('n'), &mut app);
        assert_eq!(app.engine.store().vehicles().len(), 1);

        screen.handle_event(&key('d'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);
        assert!(app.engine.store().vehicles().is_empty());
        assert!(app.status_message.contains("deleted"));
        assert!(matches!(screen.step, Step::Pick));
    }

    #[test]
    fn test_delete_refused_for_vehicle_with_history() {
        let mut app = test_app();
        let vehicle = app.engine.store().vehicles().remove(0);
        let customer = app.engine.store().customers().remove(0);
        let rental = app
            .engine
            .open_rental(vehicle.id, customer.id, vehicle.agency_id, t0())
            .unwrap();
        app.engine
            .close_rental(rental.id, t0() + Duration::days(1))
            .unwrap();

        let mut screen = Fleet::new(&app);
        open_first(&mut screen, &mut app);
        screen.handle_event(&key('d'), &mut app);
        screen.handle_event(&key('y'), &mut app);

        assert!(app.status_message.contains("rental history"));
        assert_eq!(app.engine.store().vehicles().len(), 1);
        assert!(matches!(screen.step, Step::Detail(_)));
    }

    #[test]
    fn test_escape_steps_back_to_list_then_leaves() {
        let mut app = test_app();
        let mut screen = Fleet::new(&app);
        open_first(&mut screen, &mut app);
        assert!(screen.handle_event(&TuiEvent::Escape, &mut app).is_none());
        assert_eq!(screen.title(), "Vehicles");
        assert!(matches!(
            screen.handle_event(&TuiEvent::Escape, &mut app),
            Some(Transition::Back)
        ));
    }
}

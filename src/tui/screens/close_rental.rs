use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::flow::Transition;
use crate::core::listing::Select;
use crate::core::model::{Money, Timestamp};
use crate::core::rental::RentalDetails;
use crate::core::state::App;
use crate::core::store::RecordStore;
use crate::tui::component::{Nav, View};
use crate::tui::components::{ListEvent, ListPanel};
use crate::tui::event::TuiEvent;

enum Step {
    Pick(ListPanel<RentalDetails, Select>),
    /// Charge quoted as of `end`; the rental is closed at that same instant.
    Confirm {
        details: RentalDetails,
        end: Timestamp,
        quote: Money,
    },
    Done {
        details: RentalDetails,
    },
}

/// Pick an open rental, confirm, and show the charge.
pub struct CloseRental {
    step: Step,
}

fn pick_step(app: &App) -> Step {
    let open = app.engine.describe(app.engine.list_open_rentals());
    Step::Pick(ListPanel::new(open, app.page_size))
}

fn format_time(t: Timestamp) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

impl CloseRental {
    pub fn new(app: &App) -> Self {
        Self {
            step: pick_step(app),
        }
    }

    fn confirm(&mut self, app: &mut App) {
        let Step::Confirm { details, end, .. } = &self.step else {
            return;
        };
        match app.engine.close_rental(details.rental.id, *end) {
            Ok(rental) => {
                let charge = rental.charge().unwrap_or_default();
                app.notify(format!("Rental closed: {} charged {}", details.plate, charge));
                let details = RentalDetails {
                    rental,
                    ..details.clone()
                };
                self.step = Step::Done { details };
            }
            Err(e) => {
                app.notify(e.to_string());
                self.step = pick_step(app);
            }
        }
    }
}

impl View for CloseRental {
    fn name(&self) -> &str {
        "close-rental"
    }

    fn title(&self) -> String {
        let step = match &self.step {
            Step::Pick(_) => "choose rental",
            Step::Confirm { .. } => "confirm",
            Step::Done { .. } => "closed",
        };
        format!("Close rental › {step}")
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        let (details, end, charge, prompt) = match &mut self.step {
            Step::Pick(panel) => {
                panel.render(frame, area, Some("Type a number and Enter to pick"));
                return;
            }
            Step::Confirm {
                details,
                end,
                quote,
            } => (
                &*details,
                *end,
                *quote,
                "Close this rental now? Enter/y to confirm, Esc/n to go back",
            ),
            Step::Done { details } => (
                &*details,
                details.rental.end().unwrap_or(details.rental.start),
                details.rental.charge().unwrap_or_default(),
                "Press any key to return",
            ),
        };

        let lines = vec![
            Line::from(format!("Vehicle:  {} {}", details.plate, details.vehicle)),
            Line::from(format!("Customer: {}", details.customer)),
            Line::from(format!("Agency:   {}", details.agency)),
            Line::from(format!("Start:    {}", format_time(details.rental.start))),
            Line::from(format!("End:      {}", format_time(end))),
            Line::styled(
                format!("Charge:   {charge}"),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled(prompt, Style::default().fg(Color::Yellow)),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().padding(Padding::uniform(1))),
            area,
        );
    }

    fn help(&self) -> &'static str {
        match self.step {
            Step::Pick(_) => "←→ Page  / Filter  0-9 Enter Pick  Esc Back",
            Step::Confirm { .. } => "Enter Confirm  Esc Back",
            Step::Done { .. } => "Any key Back",
        }
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        match &mut self.step {
            Step::Pick(panel) => match panel.handle_event(event)? {
                ListEvent::Back => return Some(Transition::Back),
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(details) => {
                    let end = app.now();
                    match app.engine.store().vehicle(details.rental.vehicle_id) {
                        Some(vehicle) => {
                            let quote = app.engine.quote(&details.rental, &vehicle, end);
                            self.step = Step::Confirm {
                                details,
                                end,
                                quote,
                            };
                        }
                        None => app.notify(format!("vehicle {} no longer exists", details.plate)),
                    }
                }
            },
            Step::Confirm { .. } => match event {
                TuiEvent::Submit | TuiEvent::InputChar('y' | 'Y') => self.confirm(app),
                TuiEvent::Escape | TuiEvent::InputChar('n' | 'N') => self.step = pick_step(app),
                _ => {}
            },
            Step::Done { .. } => return Some(Transition::Back),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{RentalStatus, VehicleStatus};
    use crate::test_support::{t0, test_app};
    use chrono::Duration;

    fn open_three_days_ago(app: &mut App) -> crate::core::model::Rental {
        let vehicle = app.engine.store().vehicles().remove(0);
        let customer = app.engine.store().customers().remove(0);
        app.engine
            .open_rental(
                vehicle.id,
                customer.id,
                vehicle.agency_id,
                t0() - Duration::days(3),
            )
            .unwrap()
    }

    fn key(c: char) -> TuiEvent {
        TuiEvent::InputChar(c)
    }

    #[test]
    fn test_close_flow_charges_and_frees_vehicle() {
        let mut app = test_app();
        let rental = open_three_days_ago(&mut app);
        let mut screen = CloseRental::new(&app);

        screen.handle_event(&key('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);
        match &screen.step {
            Step::Confirm { quote, end, .. } => {
                assert_eq!(*quote, Money::from_cents(15_000));
                assert_eq!(*end, t0());
            }
            _ => panic!("expected confirmation step"),
        }

        assert!(screen.handle_event(&TuiEvent::Submit, &mut app).is_none());
        assert!(screen.title().contains("closed"));
        assert!(app.status_message.contains("150.00"));

        let closed = app.engine.store().rental(rental.id).unwrap();
        assert_eq!(closed.status(), RentalStatus::Closed);
        assert_eq!(closed.charge(), Some(Money::from_cents(15_000)));
        let vehicle = app.engine.store().vehicle(rental.vehicle_id).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);

        assert!(matches!(
            screen.handle_event(&key('x'), &mut app),
            Some(Transition::Back)
        ));
    }

    #[test]
    fn test_declining_keeps_rental_open() {
        let mut app = test_app();
        open_three_days_ago(&mut app);
        let mut screen = CloseRental::new(&app);

        screen.handle_event(&key('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);
        screen.handle_event(&key('n'), &mut app);

        assert!(screen.title().contains("choose rental"));
        assert_eq!(app.engine.list_open_rentals().len(), 1);
    }

    #[test]
    fn test_no_open_rentals() {
        let mut app = test_app();
        let mut screen = CloseRental::new(&app);
        screen.handle_event(&key('1'), &mut app);
        screen.handle_event(&TuiEvent::Submit, &mut app);
        assert!(app.status_message.contains("empty"));
        assert!(matches!(
            screen.handle_event(&TuiEvent::Escape, &mut app),
            Some(Transition::Back)
        ));
    }
}

use log::info;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::flow::Transition;
use crate::core::listing::Select;
use crate::core::model::{Agency, Customer, Vehicle};
use crate::core::state::App;
use crate::core::store::RecordStore;
use crate::tui::component::{Nav, View};
use crate::tui::components::{ListEvent, ListPanel};
use crate::tui::event::TuiEvent;

enum Step {
    Agency(ListPanel<Agency, Select>),
    Vehicle {
        agency: Agency,
        panel: ListPanel<Vehicle, Select>,
    },
    Customer {
        agency: Agency,
        vehicle: Vehicle,
        panel: ListPanel<Customer, Select>,
    },
    Confirm {
        agency: Agency,
        vehicle: Vehicle,
        customer: Customer,
    },
}

/// Wizard: agency → available vehicle of that agency → customer → confirm.
/// The rental starts at the moment of confirmation.
pub struct NewRental {
    step: Step,
}

fn agency_step(app: &App) -> Step {
    Step::Agency(ListPanel::new(app.engine.store().agencies(), app.page_size))
}

fn vehicle_step(app: &App, agency: Agency) -> Step {
    let vehicles = app.engine.find_available_vehicles(Some(agency.id));
    Step::Vehicle {
        agency,
        panel: ListPanel::new(vehicles, app.page_size),
    }
}

fn customer_step(app: &App, agency: Agency, vehicle: Vehicle) -> Step {
    Step::Customer {
        agency,
        vehicle,
        panel: ListPanel::new(app.engine.store().customers(), app.page_size),
    }
}

impl NewRental {
    pub fn new(app: &App) -> Self {
        Self {
            step: agency_step(app),
        }
    }

    fn confirm(&mut self, app: &mut App) -> Option<Nav> {
        let Step::Confirm {
            agency,
            vehicle,
            customer,
        } = &self.step
        else {
            return None;
        };

        let start = app.now();
        match app
            .engine
            .open_rental(vehicle.id, customer.id, agency.id, start)
        {
            Ok(rental) => {
                info!("Rental {} opened from the terminal", rental.id);
                app.notify(format!(
                    "Rental opened: {} for {} at {}",
                    vehicle.plate,
                    customer.name,
                    start.format("%Y-%m-%d %H:%M")
                ));
                Some(Transition::Back)
            }
            Err(e) => {
                app.notify(e.to_string());
                let agency = agency.clone();
                self.step = vehicle_step(app, agency);
                None
            }
        }
    }
}

impl View for NewRental {
    fn name(&self) -> &str {
        "new-rental"
    }

    fn title(&self) -> String {
        let step = match &self.step {
            Step::Agency(_) => "choose agency",
            Step::Vehicle { .. } => "choose vehicle",
            Step::Customer { .. } => "choose customer",
            Step::Confirm { .. } => "confirm",
        };
        format!("New rental › {step}")
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _app: &App) {
        match &mut self.step {
            Step::Agency(panel) => panel.render(frame, area, Some("Type a number and Enter to pick")),
            Step::Vehicle { agency, panel } => {
                let hint = format!("Available at {}", agency.name);
                panel.render(frame, area, Some(&hint));
            }
            Step::Customer { vehicle, panel, .. } => {
                let hint = format!("Renting {} {} {}", vehicle.plate, vehicle.brand, vehicle.model);
                panel.render(frame, area, Some(&hint));
            }
            Step::Confirm {
                agency,
                vehicle,
                customer,
            } => {
                let lines = vec![
                    Line::from(format!("Agency:     {}", agency.name)),
                    Line::from(format!(
                        "Vehicle:    {} {} {}",
                        vehicle.plate, vehicle.brand, vehicle.model
                    )),
                    Line::from(format!("Daily rate: {}", vehicle.daily_rate)),
                    Line::from(format!(
                        "Customer:   {} ({} {})",
                        customer.name,
                        customer.kind.document_label(),
                        customer.document
                    )),
                    Line::default(),
                    Line::styled(
                        "Open this rental now? Enter/y to confirm, Esc/n to go back",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                ];
                frame.render_widget(
                    Paragraph::new(lines).block(Block::default().padding(Padding::uniform(1))),
                    area,
                );
            }
        }
    }

    fn help(&self) -> &'static str {
        match self.step {
            Step::Confirm { .. } => "Enter Confirm  Esc Back",
            _ => "←→ Page  / Filter  0-9 Enter Pick  Esc Back",
        }
    }

    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav> {
        match &mut self.step {
            Step::Agency(panel) => match panel.handle_event(event)? {
                ListEvent::Back => return Some(Transition::Back),
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(agency) => {
                    if app.engine.find_available_vehicles(Some(agency.id)).is_empty() {
                        app.notify(format!("{} has no available vehicles", agency.name));
                    } else {
                        self.step = vehicle_step(app, agency);
                    }
                }
            },
            Step::Vehicle { agency, panel } => match panel.handle_event(event)? {
                ListEvent::Back => self.step = agency_step(app),
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(vehicle) => {
                    let agency = agency.clone();
                    self.step = customer_step(app, agency, vehicle);
                }
            },
            Step::Customer {
                agency,
                vehicle,
                panel,
            } => match panel.handle_event(event)? {
                ListEvent::Back => {
                    let agency = agency.clone();
                    self.step = vehicle_step(app, agency);
                }
                ListEvent::Notice(message) => app.notify(message),
                ListEvent::Chosen(customer) => {
                    self.step = Step::Confirm {
                        agency: agency.clone(),
                        vehicle: vehicle.clone(),
                        customer,
                    };
                }
            },
            Step::Confirm {
                agency, vehicle, ..
            } => match event {
                TuiEvent::Submit | TuiEvent::InputChar('y' | 'Y') => return self.confirm(app),
                TuiEvent::Escape | TuiEvent::InputChar('n' | 'N') => {
                    let (agency, vehicle) = (agency.clone(), vehicle.clone());
                    self.step = customer_step(app, agency, vehicle);
                }
                _ => {}
            },
        }
        None
    }
}

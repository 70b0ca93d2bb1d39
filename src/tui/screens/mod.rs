//! # Screens
//!
//! Every full-screen view the operator can navigate to.
//!
//! ```text
//! MainMenu
//! ├── RecordList<Agency | Customer>
//! ├── Fleet          vehicle → maintenance / delete
//! ├── NewCustomer / NewAgency / NewVehicle
//! └── RentalsMenu
//!     ├── NewRental      agency → vehicle → customer → confirm
//!     ├── CloseRental    rental → confirm → charge
//!     └── RecordList<RentalDetails>  (open / closed)
//! ```
//!
//! Multi-step screens (wizards) keep their intermediate choices in their own
//! state instead of pushing one screen per step, so Esc inside a wizard
//! steps back within it and only leaves from the first step.

mod close_rental;
mod fleet;
mod main_menu;
mod new_rental;
mod record_list;
mod register;
mod rentals_menu;

pub use close_rental::CloseRental;
pub use fleet::Fleet;
pub use main_menu::MainMenu;
pub use new_rental::NewRental;
pub use record_list::RecordList;
pub use register::{NewAgency, NewCustomer, NewVehicle};
pub use rentals_menu::RentalsMenu;

//! # Core Application Logic
//!
//! This module contains Rentdesk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • rental lifecycle     │
//!                    │  • paginated lists      │
//!                    │  • navigation stack     │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: the records (Agency, Vehicle, Customer, Rental)
//! - [`rental`]: open/close rentals, availability
//! - [`catalog`]: record administration
//! - [`listing`]: generic paginated, filterable lists
//! - [`flow`]: the screen stack
//! - [`store`]: persistence seam and its implementations
//! - [`state`]: the `App` struct handed to every screen

pub mod billing;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod listing;
pub mod model;
pub mod rental;
pub mod seed;
pub mod state;
pub mod store;

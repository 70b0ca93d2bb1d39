//! # TUI Components
//!
//! Reusable widgets the screens are built from.
//!
//! ## Component Architecture
//!
//! Every component is stateful and event-driven: the owning screen keeps the
//! state, forwards each [`TuiEvent`](crate::tui::event::TuiEvent) to its
//! `handle_event`, and reacts to the event it emits. Rendering receives
//! everything it needs as parameters and never reads the `App`.
//!
//! | Component   | Emits          | Used by                         |
//! |-------------|----------------|---------------------------------|
//! | `MenuState` | `MenuEvent`    | main menu, rentals menu         |
//! | `ListPanel` | `ListEvent<T>` | record lists and pickers        |
//! | `FormState` | `FormEvent`    | registration screens            |
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── menu.rs         (numbered options)
//! ├── list_panel.rs   (paged, filterable table)
//! └── form.rs         (field entry + confirmation)
//! ```

pub mod form;
pub mod list_panel;
pub mod menu;

pub use form::{FormEvent, FormState};
pub use list_panel::{ListEvent, ListPanel, TableRow};
pub use menu::{MenuEvent, MenuState};

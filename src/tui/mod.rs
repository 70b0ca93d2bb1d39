//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the current
//! screen, and translates keyboard events for it.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Screen loop
//!
//! Every screen is a [`View`]. The flow controller calls `run` on the top
//! screen, which lands in [`Desk::drive`]:
//!
//! ```text
//! on_enter ─► draw ─► read key ─► handle_event ─┬─► None: draw again
//!                                               └─► Some(nav): return to flow
//! ```
//!
//! Status messages set during `handle_event` stay on screen until the next
//! key press.

mod component;
mod components;
mod event;
mod screens;
mod ui;

use log::{info, warn};

use ratatui::DefaultTerminal;

use crate::core::flow::{FlowController, Screen, Transition};
use crate::core::state::App;

pub use component::{Nav, View};
use event::{TuiEvent, next_event};

/// What every screen runs against: the application state plus the terminal.
pub struct Desk {
    pub app: App,
    terminal: DefaultTerminal,
}

impl Desk {
    /// Run `view` until it asks to navigate.
    fn drive(&mut self, view: &mut dyn View) -> Nav {
        view.on_enter(&mut self.app);
        loop {
            let drawn = self
                .terminal
                .draw(|f| ui::draw_screen(f, &mut *view, &self.app));
            if let Err(e) = drawn {
                warn!("Failed to draw {}: {}", view.name(), e);
                return Transition::Quit;
            }

            let event = match next_event() {
                Ok(event) => event,
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    return Transition::Quit;
                }
            };
            match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => return Transition::Quit,
                _ => {}
            }

            self.app.status_message.clear();
            if let Some(nav) = view.handle_event(&event, &mut self.app) {
                return nav;
            }
        }
    }
}

impl<V: View> Screen<Desk> for V {
    fn name(&self) -> &str {
        View::name(self)
    }

    fn run(&mut self, desk: &mut Desk) -> Nav {
        desk.drive(self)
    }
}

/// Run the application until the operator leaves the main menu.
pub fn run(app: App) -> std::io::Result<()> {
    let terminal = ratatui::init();
    let mut desk = Desk { app, terminal };

    info!("Starting at main menu");
    let mut flow = FlowController::new(Box::new(screens::MainMenu::new()));
    flow.run(&mut desk);

    ratatui::restore();
    info!("Flow finished, terminal restored");
    Ok(())
}

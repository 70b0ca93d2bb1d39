use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::flow::Transition;
use crate::core::state::App;
use crate::tui::Desk;
use crate::tui::event::TuiEvent;

/// Navigation result of a screen handling an event.
pub type Nav = Transition<Desk>;

/// A full-screen view driven by the navigation stack.
///
/// Views follow the same split as components: `render` only draws,
/// `handle_event` only updates state. Neither touches the terminal, so views
/// can be exercised in tests with nothing but an `App`.
pub trait View {
    /// Short name, used in logs and by the flow controller.
    fn name(&self) -> &str;

    /// Title shown in the header bar.
    fn title(&self) -> String;

    /// Called each time the view gets control, including when a screen on
    /// top of it is popped. Reload anything that may have changed.
    fn on_enter(&mut self, _app: &mut App) {}

    /// Render the body into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &App);

    /// Key hints for the footer.
    fn help(&self) -> &'static str;

    /// Handle one event. `Some` hands control back to the flow controller.
    fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<Nav>;
}

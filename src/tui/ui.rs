use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::state::App;
use crate::tui::component::View;

/// Frame layout shared by every screen:
///
/// ```text
/// ┌ Rentdesk │ <title> ─────────────┐
/// │ body                            │
/// └─────────────────────────────────┘
///  <status message>
///  <key hints>
/// ```
pub fn draw_screen(frame: &mut Frame, view: &mut dyn View, app: &App) {
    use Constraint::{Length, Min};
    let [body_area, status_area, help_area] =
        Layout::vertical([Min(0), Length(1), Length(1)]).areas(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::styled(" Rentdesk ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!("│ {} ", view.title()), Style::default().fg(Color::White)),
        ]));
    let inner = block.inner(body_area);
    frame.render_widget(block, body_area);
    view.render(frame, inner, app);

    draw_status(frame, status_area, &app.status_message);
    frame.render_widget(
        Paragraph::new(format!(" {}", view.help())).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, message: &str) {
    if message.is_empty() {
        return;
    }
    frame.render_widget(
        Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
        area,
    );
}

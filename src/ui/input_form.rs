use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{border_style, focused_border_style, hint_style, modal_title_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "Add a task...";

/// Render the add bar
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.ui_mode == UiMode::Composing;

    let line = if app.compose.is_empty() && !focused {
        Line::from(Span::styled(PLACEHOLDER, hint_style()))
    } else {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.compose.clone(), modal_title_style()),
            if focused {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { focused_border_style() } else { border_style() })
        .title(Span::styled(
            format!(" New Task ({}/100) ", app.compose.trim().chars().count()),
            title_style(),
        ));

    f.render_widget(Paragraph::new(line).block(block), area);
}

use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current mode
pub fn hints(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            "↑/↓ select",
            "a add",
            "e edit",
            "Space done",
            "d delete",
            "C clear",
            "1/2/3 or f filter",
            "q quit",
        ],
        UiMode::Composing => &["Enter add", "Esc back"],
        UiMode::Editing => &["Enter/Esc save", "Tab done"],
        UiMode::Confirming => &["y confirm", "n cancel"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let spans: Vec<Span> = hints(mode)
        .iter()
        .map(|hint| Span::raw(format!(" {}  ", hint)))
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}

use crate::notifications::Notification;
use crate::ui::styles::banner_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the notification banner, if one is up
pub fn render_banner(f: &mut Frame, notification: Option<&Notification>, area: Rect) {
    if let Some(note) = notification {
        let paragraph = Paragraph::new(Line::from(format!(" {} ", note.message.trim())))
            .style(banner_style(note.severity));
        f.render_widget(paragraph, area);
    }
}

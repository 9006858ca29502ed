use crate::domain::{filter_label, Filter, TaskListView};
use crate::ui::styles::{active_tab_style, hint_style};
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};

/// Render "All (n) | Completed (n) | In-Progress (n)"
pub fn render_filter_tabs(f: &mut Frame, view: &TaskListView, area: Rect) {
    let titles: Vec<Line> = Filter::all()
        .iter()
        .enumerate()
        .map(|(idx, filter)| Line::from(format!("{} {}", idx + 1, filter_label(*filter, &view.counts))))
        .collect();
    let selected = Filter::all()
        .iter()
        .position(|filter| *filter == view.filter)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(hint_style())
        .highlight_style(active_tab_style())
        .divider("|");

    f.render_widget(tabs, area);
}

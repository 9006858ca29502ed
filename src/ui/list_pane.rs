use crate::app::AppState;
use crate::domain::{checkbox_glyph, TaskRow, EMPTY_STATE_MESSAGE};
use crate::ui::styles::{
    border_style, default_style, done_style, editing_style, hint_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task list, or the empty-state message
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", view.filter.label()), title_style()));

    if view.empty_state {
        let paragraph = Paragraph::new(Line::from(Span::styled(EMPTY_STATE_MESSAGE, hint_style())))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| ListItem::new(create_task_line(row)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(view.rows.len().saturating_sub(1))));
    f.render_stateful_widget(list, area, &mut state);
}

/// Format: [x] Buy milk
fn create_task_line(row: &TaskRow) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{} ", checkbox_glyph(row.checked)))];

    if row.editing {
        spans.push(Span::styled(row.text.clone(), editing_style()));
        spans.push(Span::styled("█", editing_style()));
    } else if row.completed {
        spans.push(Span::styled(row.text.clone(), done_style()));
    } else {
        spans.push(Span::styled(row.text.clone(), default_style()));
    }

    Line::from(spans)
}

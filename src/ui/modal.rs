use crate::dialog::ConfirmPrompt;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Turn `<br>` line breaks and `<b>` emphasis into styled lines
pub fn markup_lines(message: &str) -> Vec<Line<'static>> {
    message
        .split("<br>")
        .map(|segment| {
            let mut spans = Vec::new();
            let mut bold = false;
            let mut rest = segment;

            while !rest.is_empty() {
                let tag = if bold { "</b>" } else { "<b>" };
                let (text, next, closed) = match rest.find(tag) {
                    Some(pos) => (&rest[..pos], &rest[pos + tag.len()..], true),
                    None => (rest, "", false),
                };
                if !text.is_empty() {
                    let style = if bold {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(text.to_string(), style));
                }
                if closed {
                    bold = !bold;
                }
                rest = next;
            }

            Line::from(spans)
        })
        .collect()
}

/// Render the confirmation dialog
pub fn render_confirm_modal(f: &mut Frame, prompt: &ConfirmPrompt, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    lines.extend(markup_lines(&prompt.message));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("[y]", modal_title_style()),
        Span::raw(" Yes  "),
        Span::styled("[n]", modal_title_style()),
        Span::raw(" No  "),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Confirm ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_markup_plain_message() {
        let lines = markup_lines("Are you sure you want to clear all tasks?");
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "Are you sure you want to clear all tasks?");
    }

    #[test]
    fn test_markup_breaks_and_bold() {
        let lines = markup_lines("Are you sure you want to delete the task?<br><br><b>\"Buy milk\"</b>");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());

        let bold = &lines[2].spans[0];
        assert_eq!(bold.content.as_ref(), "\"Buy milk\"");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_markup_unclosed_bold_runs_to_end() {
        let lines = markup_lines("a <b>b");
        assert_eq!(lines[0].spans.len(), 2);
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }
}

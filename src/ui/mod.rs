pub mod banner_pane;
pub mod filter_tabs;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use banner_pane::render_banner;
use filter_tabs::render_filter_tabs;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_confirm_modal;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let view = app.view();

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_input_form(f, app, layout.input_area);
    render_filter_tabs(f, &view, layout.filter_area);
    render_list_pane(f, app, layout.list_area);
    render_banner(f, app.banner(), layout.banner_area);

    if let Some(prompt) = app.prompt() {
        render_confirm_modal(f, prompt, size);
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub input_area: Rect,
    pub filter_area: Rect,
    pub list_area: Rect,
    pub banner_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Add bar (3 rows, bordered)
/// - Filter tabs (1 row)
/// - Task list (rest)
/// - Notification banner (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Add bar
            Constraint::Length(1), // Filter tabs
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Banner
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        input_area: chunks[1],
        filter_area: chunks[2],
        list_area: chunks[3],
        banner_area: chunks[4],
    }
}

/// Create centered modal area for the confirmation dialog
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub cursor_bg: Color,

    // Specific components
    pub title: Style,
    pub loading: Style,
    pub table_header: Style,
    pub checkbox_on: Style,
    pub checkbox_off: Style,
    pub selected_row: Style,
    pub cursor_row: Style,
    pub pager_enabled: Style,
    pub pager_disabled: Style,
    pub selection_count: Style,
    pub footer: Style,
    pub popup_title: Style,
    pub popup_border: Style,
    pub popup_text: Style,
    pub alert_border: Style,
    pub input: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            text: Color::White,
            text_secondary: Color::Gray,
            cursor_bg: Color::DarkGray,

            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            loading: Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            table_header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            checkbox_on: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            checkbox_off: Style::default().fg(Color::DarkGray),
            selected_row: Style::default().fg(Color::Yellow),
            cursor_row: Style::default().add_modifier(Modifier::BOLD),
            pager_enabled: Style::default().fg(Color::Cyan),
            pager_disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            selection_count: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().fg(Color::Magenta).bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
            alert_border: Style::default().fg(Color::Red).bg(Color::Black),
            input: Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED),
        }
    }
}

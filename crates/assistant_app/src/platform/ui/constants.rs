use ratatui::style::{Color, Modifier, Style};

pub const TITLE: &str = "AI Assistant";
pub const DROP_ZONE_TEXT: &str = "Drag and drop a CSV file here or click to upload";
pub const INPUT_PLACEHOLDER: &str = "Type your message here";
pub const INPUT_TITLE: &str = "Message";
pub const PICKER_TITLE: &str = "Open CSV file (.csv) - Enter to upload, Esc to cancel";
pub const SEND_LABEL: &str = "Send";
pub const USER_LABEL: &str = "You";
pub const BOT_LABEL: &str = "Bot";
pub const KEY_HINTS: &str =
    "Enter send | Ctrl+O open file | Ctrl+P preview | PgUp/PgDn scroll | Esc quit";

pub const DROP_ZONE_HEIGHT: u16 = 3;
pub const INPUT_HEIGHT: u16 = 3;
pub const SEND_BUTTON_WIDTH: u16 = 10;
/// Preview rows shown at most, excluding header and borders.
pub const PREVIEW_MAX_ROWS: u16 = 8;
pub const SCROLL_STEP: u16 = 3;

pub fn user_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn bot_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn drop_zone_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn button_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

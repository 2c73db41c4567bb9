use assistant_core::AppViewModel;
use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::*;

/// Screen regions for one frame, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub title: Rect,
    pub drop_zone: Rect,
    pub file_actions: Option<Rect>,
    pub preview: Option<Rect>,
    pub transcript: Rect,
    pub input: Rect,
    pub send_button: Rect,
    pub status: Rect,
}

pub fn compute(area: Rect, view: &AppViewModel) -> ScreenLayout {
    let has_file = view.preview_label.is_some();
    let preview_height = view.preview.as_ref().map(|preview| {
        let rows = (preview.rows.len() as u16).clamp(1, PREVIEW_MAX_ROWS);
        // header row plus top and bottom border
        rows + 3
    });

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(DROP_ZONE_HEIGHT)];
    if has_file {
        constraints.push(Constraint::Length(1));
    }
    if let Some(height) = preview_height {
        constraints.push(Constraint::Length(height));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(INPUT_HEIGHT));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).split(area);
    let mut index = 0;
    let mut next = || {
        let rect = chunks[index];
        index += 1;
        rect
    };

    let title = next();
    let drop_zone = next();
    let file_actions = has_file.then(&mut next);
    let preview = preview_height.map(|_| next());
    let transcript = next();
    let input_row = next();
    let status = next();

    let [input, send_button] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(SEND_BUTTON_WIDTH)])
            .areas(input_row);

    ScreenLayout {
        title,
        drop_zone,
        file_actions,
        preview,
        transcript,
        input,
        send_button,
        status,
    }
}

/// Splits the file actions row into the file name and the preview button.
pub fn file_actions(row: Rect, button_label: &str) -> (Rect, Rect) {
    let button_width = button_label.chars().count() as u16 + 4;
    let [name, button] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(button_width)]).areas(row);
    (name, button)
}

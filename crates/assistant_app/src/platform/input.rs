//! Maps terminal events onto controller messages and front-end commands.

use std::path::PathBuf;

use assistant_core::{Key, Msg};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::files;
use super::ui::{Hitboxes, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    /// A pasted path that names a file: treated as a drop, never as text.
    Drop(PathBuf),
    OpenPicker,
    ClosePicker,
    EditPicker(String),
    SubmitPicker,
    ScrollUp,
    ScrollDown,
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent, draft: &str, picker: Option<&str>) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    if let Some(path) = picker {
        return match key.code {
            KeyCode::Esc => Command::ClosePicker,
            KeyCode::Enter => Command::SubmitPicker,
            KeyCode::Backspace => {
                let mut path = path.to_string();
                path.pop();
                Command::EditPicker(path)
            }
            KeyCode::Char(ch) if !ctrl => Command::EditPicker(format!("{path}{ch}")),
            _ => Command::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Char('o') if ctrl => Command::OpenPicker,
        KeyCode::Char('p') if ctrl => Command::Dispatch(Msg::PreviewToggled),
        KeyCode::PageUp => Command::ScrollUp,
        KeyCode::PageDown => Command::ScrollDown,
        // Shift+Enter and friends send too.
        KeyCode::Enter => Command::Dispatch(Msg::KeyPressed(Key::Enter)),
        KeyCode::Backspace => {
            let mut text = draft.to_string();
            text.pop();
            Command::Dispatch(Msg::DraftChanged(text))
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Command::Dispatch(Msg::DraftChanged(format!("{draft}{ch}")))
        }
        _ => Command::Dispatch(Msg::KeyPressed(Key::Other)),
    }
}

pub fn map_paste(text: &str, draft: &str, picker: Option<&str>) -> Command {
    if let Some(path) = picker {
        return Command::EditPicker(format!("{path}{}", single_line(text.trim())));
    }
    if let Some(path) = files::dropped_path(text) {
        return Command::Drop(path);
    }
    Command::Dispatch(Msg::DraftChanged(format!("{draft}{}", single_line(text))))
}

pub fn map_mouse(mouse: MouseEvent, hitboxes: &Hitboxes, drag_active: bool) -> Command {
    let target = hitboxes.target_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match target {
            Some(Target::DropZone) => Command::OpenPicker,
            Some(Target::SendButton) => Command::Dispatch(Msg::SendClicked),
            Some(Target::PreviewButton) => Command::Dispatch(Msg::PreviewToggled),
            None => Command::Ignore,
        },
        MouseEventKind::Drag(_) => match (target, drag_active) {
            (Some(Target::DropZone), false) => Command::Dispatch(Msg::DragEntered),
            (Some(Target::DropZone), true) => Command::Dispatch(Msg::DragOver),
            (_, true) => Command::Dispatch(Msg::DragLeft),
            _ => Command::Ignore,
        },
        // A mouse drag carries no file, so releasing it only ends the highlight.
        MouseEventKind::Up(_) if drag_active => Command::Dispatch(Msg::DragLeft),
        MouseEventKind::ScrollUp => Command::ScrollUp,
        MouseEventKind::ScrollDown => Command::ScrollDown,
        _ => Command::Ignore,
    }
}

fn single_line(text: &str) -> String {
    text.chars()
        .filter(|ch| *ch != '\r')
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect()
}

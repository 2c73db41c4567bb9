pub mod constants;
pub mod layout;
pub mod render;

use ratatui::layout::{Position, Rect};

/// Front-end state that the controller does not own.
#[derive(Debug, Default)]
pub struct UiState {
    pub scroll: TranscriptScroll,
    /// Text of the file picker prompt while it is open.
    pub picker: Option<String>,
    pub status: Option<String>,
    pub hitboxes: Hitboxes,
}

/// Clickable regions recorded by the last render.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hitboxes {
    pub drop_zone: Rect,
    pub send_button: Rect,
    pub preview_button: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    DropZone,
    SendButton,
    PreviewButton,
}

impl Hitboxes {
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        if self.drop_zone.contains(position) {
            Some(Target::DropZone)
        } else if self.send_button.contains(position) {
            Some(Target::SendButton)
        } else if self
            .preview_button
            .is_some_and(|button| button.contains(position))
        {
            Some(Target::PreviewButton)
        } else {
            None
        }
    }
}

/// Scroll position of the transcript. While pinned, the view follows the last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptScroll {
    offset: u16,
    pinned: bool,
}

impl Default for TranscriptScroll {
    fn default() -> Self {
        Self {
            offset: 0,
            pinned: true,
        }
    }
}

impl TranscriptScroll {
    pub fn pin_to_bottom(&mut self) {
        self.pinned = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.pinned = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines);
    }

    /// Clamps against the content height and returns the offset to draw with.
    pub fn resolve(&mut self, content_lines: usize, viewport_lines: u16) -> u16 {
        let max_offset = content_lines
            .saturating_sub(viewport_lines as usize)
            .min(u16::MAX as usize) as u16;
        if self.pinned || self.offset >= max_offset {
            self.offset = max_offset;
            self.pinned = true;
        }
        self.offset
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

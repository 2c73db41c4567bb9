use std::collections::BTreeMap;

use crate::table::ParsedTable;
use crate::view_model::{AppViewModel, MessageView, TablePreview};

pub type RequestId = u64;

/// Greeting every transcript starts with.
pub const GREETING: &str = "Hi! How can I help you?";
/// Bot reply appended when an upload fails.
pub const UPLOAD_ERROR_TEXT: &str = "Error processing file.";

pub const PREVIEW_SHOW_LABEL: &str = "Preview CSV";
pub const PREVIEW_HIDE_LABEL: &str = "Hide Preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    origin: Origin,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Bot,
            text: text.into(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A file chosen by the picker or dropped on the drop zone, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The selected file and the table parsed from it; they are only ever set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file: SelectedFile,
    pub table: ParsedTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    transcript: Vec<Message>,
    draft: String,
    loaded: Option<LoadedFile>,
    show_preview: bool,
    drag_active: bool,
    pending_queries: BTreeMap<RequestId, Message>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transcript: vec![Message::bot(GREETING)],
            draft: String::new(),
            loaded: None,
            show_preview: false,
            drag_active: false,
            pending_queries: BTreeMap::new(),
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let file_name = self.loaded.as_ref().map(|loaded| loaded.file.name.clone());
        let preview_label = self.loaded.as_ref().map(|_| {
            if self.show_preview {
                PREVIEW_HIDE_LABEL
            } else {
                PREVIEW_SHOW_LABEL
            }
        });
        let preview = match (&self.loaded, self.show_preview) {
            (Some(loaded), true) => Some(TablePreview::from_table(&loaded.table)),
            _ => None,
        };

        AppViewModel {
            transcript: self
                .transcript
                .iter()
                .map(|message| MessageView {
                    origin: message.origin(),
                    text: message.text().to_string(),
                })
                .collect(),
            draft: self.draft.clone(),
            file_name,
            preview_label,
            preview,
            drag_active: self.drag_active,
            dirty: self.dirty,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.loaded.as_ref().map(|loaded| &loaded.file)
    }

    pub fn parsed_table(&self) -> Option<&ParsedTable> {
        self.loaded.as_ref().map(|loaded| &loaded.table)
    }

    pub fn preview_visible(&self) -> bool {
        self.show_preview
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Number of queries sent whose reply has not resolved yet.
    pub fn pending_query_count(&self) -> usize {
        self.pending_queries.len()
    }

    /// Returns whether a re-render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        if self.draft != text {
            self.draft = text;
            self.mark_dirty();
        }
    }

    /// Moves the draft into a pending query. Returns `None` for an empty draft.
    pub(crate) fn take_draft_as_query(&mut self) -> Option<(RequestId, String)> {
        if self.draft.is_empty() {
            return None;
        }
        let prompt = std::mem::take(&mut self.draft);
        let request_id = self.allocate_request_id();
        self.pending_queries
            .insert(request_id, Message::user(prompt.clone()));
        self.mark_dirty();
        Some((request_id, prompt))
    }

    /// Resolves a pending query. Returns `true` when the transcript grew.
    pub(crate) fn resolve_query(&mut self, request_id: RequestId, reply: Option<String>) -> bool {
        let Some(user) = self.pending_queries.remove(&request_id) else {
            return false;
        };
        match reply {
            Some(text) => {
                self.transcript.push(user);
                self.transcript.push(Message::bot(text));
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn append_bot(&mut self, text: &str) {
        self.transcript.push(Message::bot(text));
        self.mark_dirty();
    }

    pub(crate) fn load_file(&mut self, file: SelectedFile) -> RequestId {
        let table = ParsedTable::parse(&file.bytes);
        self.loaded = Some(LoadedFile { file, table });
        self.mark_dirty();
        self.allocate_request_id()
    }

    pub(crate) fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
        self.mark_dirty();
    }

    pub(crate) fn set_drag_active(&mut self, active: bool) {
        if self.drag_active != active {
            self.drag_active = active;
            self.mark_dirty();
        }
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

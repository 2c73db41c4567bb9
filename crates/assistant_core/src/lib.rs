//! Assistant core: pure chat-and-upload controller and view-model helpers.
mod effect;
mod msg;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Key, Msg, RequestFailure};
pub use state::{
    AppState, LoadedFile, Message, Origin, RequestId, SelectedFile, GREETING,
    PREVIEW_HIDE_LABEL, PREVIEW_SHOW_LABEL, UPLOAD_ERROR_TEXT,
};
pub use table::{ParseIssue, ParseIssueKind, ParsedTable, TableRow};
pub use update::update;
pub use view_model::{AppViewModel, MessageView, TablePreview};

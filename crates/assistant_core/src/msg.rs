use crate::{RequestId, SelectedFile};

/// Keys the controller distinguishes. Modifiers are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the message box; carries the full new text.
    DraftChanged(String),
    /// A key went down while the message box had focus.
    KeyPressed(Key),
    /// User clicked Send.
    SendClicked,
    /// User picked a file through the file picker.
    FileSelected(SelectedFile),
    /// A drag gesture entered the drop zone.
    DragEntered,
    /// A drag gesture moved within the drop zone.
    DragOver,
    /// A drag gesture left the drop zone without dropping.
    DragLeft,
    /// A file was dropped on the drop zone.
    FileDropped(SelectedFile),
    /// User clicked the preview button.
    PreviewToggled,
    /// The query endpoint answered (or failed) for a sent message.
    QueryResolved {
        request_id: RequestId,
        result: Result<String, RequestFailure>,
    },
    /// The upload endpoint answered (or failed) for a selected file.
    UploadResolved {
        request_id: RequestId,
        result: Result<(), RequestFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why a request produced no usable reply. Only used for logging and
/// the upload error message; the controller does not branch on the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

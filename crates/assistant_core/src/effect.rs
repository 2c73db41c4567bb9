use crate::{RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the prompt to the query endpoint.
    SendQuery { request_id: RequestId, prompt: String },
    /// POST the file to the upload endpoint as multipart form data.
    UploadFile {
        request_id: RequestId,
        file: SelectedFile,
    },
    /// Pin the transcript view to its last line.
    ScrollTranscriptToBottom,
}

//! Assistant engine: backend HTTP client and request execution.
mod client;
mod engine;
mod types;

pub use client::{
    BackendClient, ClientSettings, ReqwestBackendClient, QUERY_PATH, UPLOAD_FIELD, UPLOAD_PATH,
};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use types::{EngineEvent, FailureKind, RequestError, RequestId, UploadReceipt};

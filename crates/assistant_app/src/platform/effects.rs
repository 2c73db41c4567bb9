use std::sync::{mpsc, Arc};

use assistant_core::{Effect, Msg, RequestFailure};
use assistant_engine::{
    ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, RequestError,
};
use assistant_logging::{assistant_info, assistant_warn, clip_for_log};
use bytes::Bytes;

/// Executes network effects on the engine. View effects are handled by the caller.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effect: Effect) {
        match effect {
            Effect::SendQuery { request_id, prompt } => {
                assistant_info!(
                    "SendQuery request_id={} prompt_len={} prompt={}",
                    request_id,
                    prompt.len(),
                    clip_for_log(&prompt, 60)
                );
                self.engine.query(request_id, prompt);
            }
            Effect::UploadFile { request_id, file } => {
                assistant_info!(
                    "UploadFile request_id={} name={} len={}",
                    request_id,
                    file.name,
                    file.bytes.len()
                );
                self.engine
                    .upload(request_id, file.name, Bytes::from(file.bytes));
            }
            Effect::ScrollTranscriptToBottom => {
                // view-only; the app pins the transcript itself
            }
        }
    }
}

/// Turns engine completions into controller messages.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(event_to_msg(event));
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::QueryCompleted { request_id, result } => {
            if let Err(err) = &result {
                // The transcript shows nothing for a failed send; this log line is all there is.
                assistant_warn!("Query {} failed: {}", request_id, err);
            }
            Msg::QueryResolved {
                request_id,
                result: result.map_err(to_failure),
            }
        }
        EngineEvent::UploadCompleted { request_id, result } => {
            if let Err(err) = &result {
                assistant_warn!("Upload {} failed: {}", request_id, err);
            }
            Msg::UploadResolved {
                request_id,
                result: result.map(|_| ()).map_err(to_failure),
            }
        }
    }
}

fn to_failure(err: RequestError) -> RequestFailure {
    RequestFailure::new(err.to_string())
}

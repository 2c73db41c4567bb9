use std::sync::{mpsc, Arc};
use std::thread;

use assistant_logging::{assistant_debug, assistant_info, assistant_warn};
use bytes::Bytes;

use crate::client::{BackendClient, ClientSettings, ReqwestBackendClient};
use crate::{EngineEvent, FailureKind, RequestError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] RequestError),
}

/// Receives request completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Query {
        request_id: RequestId,
        prompt: String,
    },
    Upload {
        request_id: RequestId,
        file_name: String,
        bytes: Bytes,
    },
}

impl EngineCommand {
    fn failed(self, error: RequestError) -> EngineEvent {
        match self {
            EngineCommand::Query { request_id, .. } => EngineEvent::QueryCompleted {
                request_id,
                result: Err(error),
            },
            EngineCommand::Upload { request_id, .. } => EngineEvent::UploadCompleted {
                request_id,
                result: Err(error),
            },
        }
    }
}

/// Runs backend requests on a background runtime. Every command becomes an
/// independent task, so completions reach the sink in resolution order.
/// Requests are never cancelled or retried.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        assistant_info!("Backend base url {}", settings.base_url);
        let client = ReqwestBackendClient::new(settings)?;
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn BackendClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("assistant-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let worker_sink = sink.clone();

        thread::spawn(move || {
            let sink = worker_sink;
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, sink.as_ref()).await;
                });
            }
            assistant_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, sink })
    }

    pub fn query(&self, request_id: RequestId, prompt: impl Into<String>) {
        self.submit(EngineCommand::Query {
            request_id,
            prompt: prompt.into(),
        });
    }

    pub fn upload(&self, request_id: RequestId, file_name: impl Into<String>, bytes: Bytes) {
        self.submit(EngineCommand::Upload {
            request_id,
            file_name: file_name.into(),
            bytes,
        });
    }

    /// A stopped worker still answers every request, with a failure.
    fn submit(&self, command: EngineCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            assistant_warn!("Engine worker is gone; failing request");
            let error = RequestError::new(FailureKind::Network, "request engine stopped");
            self.sink.emit(command.failed(error));
        }
    }
}

async fn handle_command(client: &dyn BackendClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Query { request_id, prompt } => {
            let result = client.query(&prompt).await;
            sink.emit(EngineEvent::QueryCompleted { request_id, result });
        }
        EngineCommand::Upload {
            request_id,
            file_name,
            bytes,
        } => {
            let result = client.upload(&file_name, bytes).await;
            sink.emit(EngineEvent::UploadCompleted { request_id, result });
        }
    }
}

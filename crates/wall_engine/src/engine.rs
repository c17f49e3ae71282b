use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;
use wall_logging::{wall_debug, wall_warn};

use crate::decode::{decode_control_delay, decode_image_body};
use crate::fetch::{Accept, FetchRequest, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{ControlEndpoint, EngineEvent, FailureKind, FetchError, ImageId, Ticket};

/// Receives engine completions. Called from runtime worker threads.
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
    FetchContent { ticket: Ticket },
    AbortContent { ticket: Ticket },
    LoadAsset { image_id: ImageId, uri: String },
    SendControl { endpoint: ControlEndpoint, ticket: Ticket },
}

/// Front of the IO thread. Commands are fire-and-forget; results arrive through the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, sink: Arc<dyn EventSink>) -> Result<Self, FetchError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(&settings)?);
        Ok(Self::with_fetcher(settings, fetcher, sink))
    }

    pub fn with_fetcher(
        settings: FetchSettings,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let settings = Arc::new(settings);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    wall_warn!("engine runtime unavailable: {}", err);
                    return;
                }
            };
            let mut content: Option<(Ticket, CancellationToken)> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::AbortContent { ticket } => {
                        if let Some((current, token)) = &content {
                            if *current == ticket {
                                wall_debug!("aborting content request {}", ticket);
                                token.cancel();
                            }
                        }
                    }
                    EngineCommand::FetchContent { ticket } => {
                        let token = CancellationToken::new();
                        content = Some((ticket, token.clone()));
                        let (settings, fetcher, sink) =
                            (settings.clone(), fetcher.clone(), sink.clone());
                        runtime.spawn(async move {
                            let result = token
                                .run_until_cancelled(fetch_content(&settings, fetcher.as_ref()))
                                .await
                                .unwrap_or_else(|| {
                                    Err(FetchError::new(FailureKind::Cancelled, "aborted"))
                                });
                            sink.emit(EngineEvent::ContentFetched { ticket, result });
                        });
                    }
                    EngineCommand::LoadAsset { image_id, uri } => {
                        let (settings, fetcher, sink) =
                            (settings.clone(), fetcher.clone(), sink.clone());
                        runtime.spawn(async move {
                            let request = FetchRequest {
                                url: uri,
                                max_bytes: settings.max_asset_bytes,
                                accept: Accept::Images,
                            };
                            let result = fetcher.fetch(&request).await.map(|out| out.metadata);
                            sink.emit(EngineEvent::AssetLoaded { image_id, result });
                        });
                    }
                    EngineCommand::SendControl { endpoint, ticket } => {
                        let (settings, fetcher, sink) =
                            (settings.clone(), fetcher.clone(), sink.clone());
                        runtime.spawn(async move {
                            let result = send_control(&settings, fetcher.as_ref(), endpoint).await;
                            sink.emit(EngineEvent::ControlCompleted {
                                endpoint,
                                ticket,
                                result,
                            });
                        });
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    pub fn fetch_content(&self, ticket: Ticket) {
        let _ = self.cmd_tx.send(EngineCommand::FetchContent { ticket });
    }

    pub fn abort_content(&self, ticket: Ticket) {
        let _ = self.cmd_tx.send(EngineCommand::AbortContent { ticket });
    }

    pub fn load_asset(&self, image_id: ImageId, uri: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::LoadAsset {
            image_id,
            uri: uri.into(),
        });
    }

    pub fn send_control(&self, endpoint: ControlEndpoint, ticket: Ticket) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::SendControl { endpoint, ticket });
    }
}

async fn fetch_content(
    settings: &FetchSettings,
    fetcher: &dyn Fetcher,
) -> Result<crate::ImageRecord, FetchError> {
    let request = FetchRequest {
        url: settings.endpoint("./get")?.to_string(),
        max_bytes: settings.max_body_bytes,
        accept: Accept::Any,
    };
    let output = fetcher.fetch(&request).await?;
    decode_image_body(&output.bytes)
        .map_err(|err| FetchError::new(FailureKind::Malformed, err.to_string()))
}

async fn send_control(
    settings: &FetchSettings,
    fetcher: &dyn Fetcher,
    endpoint: ControlEndpoint,
) -> Result<Option<std::time::Duration>, FetchError> {
    let request = FetchRequest {
        url: settings.endpoint(endpoint.path())?.to_string(),
        max_bytes: settings.max_body_bytes,
        accept: Accept::Any,
    };
    let output = fetcher.fetch(&request).await?;
    Ok(decode_control_delay(&output.bytes))
}

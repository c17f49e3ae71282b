use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use wall_core::{
    ControlChannel, DisplayedImage, Effect, ImageId, IncomingImage, Msg, RequestFailed,
    DEFAULT_REENABLE_DELAY,
};
use wall_engine::{
    ControlEndpoint, EngineEvent, EngineHandle, EventSink, FetchError, FetchSettings, ImageRecord,
};
use wall_logging::{wall_debug, wall_info, wall_warn};

use super::persistence::OptionsStore;
use super::render;

/// Images handed to the engine for loading, keyed by id until the load settles.
type PendingLoads = Arc<Mutex<HashMap<ImageId, DisplayedImage>>>;

pub struct EffectRunner {
    engine: EngineHandle,
    store: OptionsStore,
    pending: PendingLoads,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        store: OptionsStore,
        msg_tx: mpsc::Sender<Msg>,
    ) -> anyhow::Result<Self> {
        let pending = PendingLoads::default();
        let sink = Arc::new(MsgSink {
            msg_tx: msg_tx.clone(),
            pending: pending.clone(),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self {
            engine,
            store,
            pending,
            msg_tx,
        })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchContent { ticket } => {
                    let cycle = wall_logging::next_poll_cycle();
                    wall_debug!("poll #{} ticket={}", cycle, ticket);
                    self.engine.fetch_content(ticket);
                }
                Effect::AbortContent { ticket } => self.engine.abort_content(ticket),
                Effect::LoadImage { image } => {
                    wall_debug!("LoadImage id={} uri={}", image.id, image.uri);
                    let (id, uri) = (image.id, image.uri.clone());
                    if let Ok(mut pending) = self.pending.lock() {
                        pending.insert(id, image);
                    }
                    self.engine.load_asset(id, uri);
                }
                Effect::ArmTimer { generation, delay } => {
                    self.send_later(delay, Msg::TimerFired { generation });
                }
                Effect::DisarmTimer => {
                    // Pending timer threads still fire; core drops their stale generation.
                    wall_debug!("timer disarmed");
                }
                Effect::SaveOptions(options) => self.store.save(&options),
                Effect::SendControl { channel, ticket } => {
                    self.engine.send_control(map_channel(channel), ticket);
                }
                Effect::ScheduleControlReenable { channel, delay } => {
                    self.send_later(delay, Msg::ControlReenableDue(channel));
                }
                Effect::BlurWindow => {
                    // A terminal has no window to blur, and nothing would refocus it.
                    wall_debug!("window blur not supported, ignored");
                }
                Effect::AttachImage { .. }
                | Effect::DetachImage { .. }
                | Effect::SetPageClass { .. } => {
                    if let Some(line) = render::describe_effect(&effect) {
                        println!("{line}");
                    }
                }
            }
        }
    }

    fn send_later(&self, delay: Duration, msg: Msg) {
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = msg_tx.send(msg);
        });
    }
}

/// Turns engine completions into messages for the update loop.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
    pending: PendingLoads,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::ContentFetched { ticket, result } => Msg::ContentFetched {
                ticket,
                result: result.map(map_record).map_err(map_failure),
                marker: cache_marker(),
            },
            EngineEvent::AssetLoaded { image_id, result } => {
                let image = self
                    .pending
                    .lock()
                    .ok()
                    .and_then(|mut pending| pending.remove(&image_id));
                match (image, result) {
                    (Some(image), Ok(metadata)) => {
                        wall_debug!(
                            "image {} loaded ({} bytes from {})",
                            image_id,
                            metadata.byte_len,
                            metadata.final_url
                        );
                        Msg::ImageLoaded { image }
                    }
                    (_, Err(err)) => {
                        wall_warn!("image {} failed to load: {}", image_id, err);
                        Msg::ImageLoadFailed { id: image_id }
                    }
                    (None, Ok(_)) => {
                        wall_debug!("image {} loaded but no longer pending", image_id);
                        Msg::ImageLoadFailed { id: image_id }
                    }
                }
            }
            EngineEvent::ControlCompleted {
                endpoint,
                ticket,
                result,
            } => {
                let channel = map_endpoint(endpoint);
                if let Ok(Some(delay)) = &result {
                    wall_info!("{} done, re-enable in {:?}", channel.path(), delay);
                }
                Msg::ControlCompleted {
                    channel,
                    ticket,
                    result: result
                        .map(|delay| delay.unwrap_or(DEFAULT_REENABLE_DELAY))
                        .map_err(map_failure),
                }
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}

fn map_record(record: ImageRecord) -> IncomingImage {
    IncomingImage {
        uri: record.uri,
        is_generic: record.is_generic,
        crawler_tag: record.crawler,
        source: record.source,
    }
}

fn map_failure(err: FetchError) -> RequestFailed {
    RequestFailed::new(err.to_string())
}

fn map_channel(channel: ControlChannel) -> ControlEndpoint {
    match channel {
        ControlChannel::Reset => ControlEndpoint::Reset,
        ControlChannel::Flush => ControlEndpoint::Flush,
    }
}

fn map_endpoint(endpoint: ControlEndpoint) -> ControlChannel {
    match endpoint {
        ControlEndpoint::Reset => ControlChannel::Reset,
        ControlEndpoint::Flush => ControlChannel::Flush,
    }
}

/// Milliseconds since the epoch; changes between polls so generic images bypass caches.
fn cache_marker() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

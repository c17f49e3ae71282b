//! Image wall engine: HTTP transport, response decoding, storage backends.
mod decode;
mod engine;
mod fetch;
mod persist;
mod storage;
mod types;

pub use decode::{decode_control_delay, decode_image_body, DecodeError};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use fetch::{Accept, FetchRequest, FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{atomic_write, ensure_parent_dir, PersistError};
pub use storage::{
    storage_factory, FileStorage, KeyValueStorage, MemoryStorage, StorageError,
};
pub use types::{
    ControlEndpoint, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, ImageId,
    ImageRecord, Ticket,
};

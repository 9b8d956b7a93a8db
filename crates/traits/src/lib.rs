pub mod resource;
pub mod sink;

pub use resource::{InMemoryMediaSource, MediaError, MediaSource, SharedMediaData};
pub use sink::{DocumentSink, MemorySink, SinkError};

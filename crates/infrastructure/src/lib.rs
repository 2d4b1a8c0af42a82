//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_record_store;
mod postgrest_record_store;
mod tracing_notification_sink;

pub use in_memory_record_store::InMemoryRecordStore;
pub use postgrest_record_store::PostgrestRecordStore;
pub use tracing_notification_sink::TracingNotificationSink;

//! Reply capture: durable local backup plus best-effort remote delivery.

mod gateway;
pub mod mock;
mod store;

pub use gateway::{
    HttpTransport, ReplyError, ReplyGateway, ReplyPayload, ReplyTransport, SubmitOutcome,
};
pub use store::{ReplyStore, REPLY_KEY, TIMESTAMP_KEY};

//! Receiving from session-enabled Service Bus queues.

pub mod message;
pub mod session;

pub use message::{BodyData, MessageModelError, SessionMessageModel};
pub use session::{ServiceBusClientExt, SessionConsumer};

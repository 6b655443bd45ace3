//! Conversion between framework messages and agent-service records.

mod inbound;
mod outbound;

pub use inbound::{to_content_blocks, to_ui_messages, InboundOptions};
pub use outbound::to_message_creates;

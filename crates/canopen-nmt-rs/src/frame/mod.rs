//! Defines the structures and logic for CAN data-link frames.

pub mod can;
pub mod codec;
pub mod nmt_command;
pub mod node_guard;

pub use can::{CanFrame, CobId, CAN_MAX_DATA_SIZE};
pub use codec::CanCodec;
pub use nmt_command::NmtCommandFrame;
pub use node_guard::{NodeGuardReply, NodeGuardRequest};

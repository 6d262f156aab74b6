#![cfg_attr(not(feature = "std"), no_std)]

// --- Foundation Modules ---
pub mod types;
pub mod hal;

// --- Data Link Layer (CAN frames) ---
pub mod frame;

// --- Network Management ---
pub mod nmt;

// --- Top-level Exports ---
pub use types::{NodeId, NmtTarget};
pub use hal::{CanInterface, CanOpenError};
pub use frame::{CanFrame, CobId};
pub use frame::codec::CanCodec;
pub use nmt::{NmtCommand, NodeState};
pub use nmt::master::{NmtMaster, NodeStateTable};

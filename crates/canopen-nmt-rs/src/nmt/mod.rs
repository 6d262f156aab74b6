//! Network Management (NMT): lifecycle commands, node guarding and the
//! master's belief table of slave states.

pub mod commands;
pub mod states;
pub mod master;

pub use commands::NmtCommand;
pub use states::NodeState;
pub use master::{NmtMaster, NodeStateTable};

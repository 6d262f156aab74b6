use crate::frame::codec::CanCodec;
use crate::frame::nmt_command::NmtCommandFrame;
use crate::frame::node_guard::NodeGuardRequest;
use crate::hal::{CanInterface, CanOpenError};
use crate::nmt::commands::NmtCommand;
use crate::nmt::states::NodeState;
use crate::types::{C_NMT_MAX_NODE_ID, NmtTarget, NodeId};
use log::debug;

/// The master's belief table: one [`NodeState`] per slave, indexed by node id.
///
/// Slot 0 is never addressed (node id 0 is the broadcast marker, not a
/// device) and exists only so entries can be indexed directly by id. All
/// entries start as `Unknown`. Writers are this module, which marks entries
/// `Unknown` when a guard request is issued, and the receive-side guard
/// handler, which records confirmed states through [`set`](Self::set).
#[derive(Debug, Clone)]
pub struct NodeStateTable {
    entries: [NodeState; C_NMT_MAX_NODE_ID],
}

impl Default for NodeStateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStateTable {
    /// Creates a table with every entry `Unknown`.
    pub fn new() -> Self {
        NodeStateTable {
            entries: [NodeState::Unknown; C_NMT_MAX_NODE_ID],
        }
    }

    /// The state currently believed for `node`.
    pub fn get(&self, node: NodeId) -> NodeState {
        self.entries[node.0 as usize]
    }

    /// Records a state for `node`. Called by the guard-reply handler once a
    /// reply has been validated.
    pub fn set(&mut self, node: NodeId, state: NodeState) {
        self.entries[node.0 as usize] = state;
    }

    /// Marks a single entry as outstanding. The write is unconditional and
    /// idempotent: a fresh guard request invalidates whatever was believed
    /// before, so there is nothing to check first.
    pub fn set_unknown(&mut self, node: NodeId) {
        self.entries[node.0 as usize] = NodeState::Unknown;
    }

    /// Marks every entry as outstanding. Used for the broadcast guard case.
    pub fn set_all_unknown(&mut self) {
        self.entries = [NodeState::Unknown; C_NMT_MAX_NODE_ID];
    }

    /// Iterates over all addressable entries as `(NodeId, NodeState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeState)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .map(|(id, state)| (NodeId(id as u8), *state))
    }
}

/// The NMT master context: commands slave lifecycle states and tracks, per
/// node, which state the master currently believes each slave is in.
///
/// One `NmtMaster` exists per bus. It owns the [`NodeStateTable`] outright;
/// exclusive access comes from `&mut self`, so callers running in several
/// execution contexts must funnel their requests through whatever owns this
/// value. The transport is handed in per call, mirroring how the rest of the
/// stack passes its interface into node operations, and its result codes are
/// returned to the caller unchanged.
#[derive(Debug, Default)]
pub struct NmtMaster {
    table: NodeStateTable,
}

impl NmtMaster {
    /// Creates a master context with an all-`Unknown` belief table.
    pub fn new() -> Self {
        NmtMaster {
            table: NodeStateTable::new(),
        }
    }

    /// Sends an NMT state-change command to one node or to all nodes.
    /// (CiA 301, Section 7.2.8.3.1)
    ///
    /// The belief table is untouched: a command is a request, not an attested
    /// fact. The table changes only once a later guard exchange confirms the
    /// new state.
    pub fn send_nmt_command(
        &self,
        interface: &mut impl CanInterface,
        target: NmtTarget,
        command: NmtCommand,
    ) -> Result<(), CanOpenError> {
        debug!(
            "[NMT] Sending command {:?} to node {}",
            command,
            target.wire_id()
        );
        let frame = NmtCommandFrame::new(command, target).to_frame();
        interface.send_frame(&frame)
    }

    /// Sends a node-guard poll without touching the belief table.
    /// (CiA 301, Section 7.2.8.3.2.1)
    ///
    /// Marking entries outstanding is [`request_node_state`]'s job; the two
    /// steps are kept separate so each stays independently testable.
    ///
    /// [`request_node_state`]: Self::request_node_state
    pub fn send_node_guard(
        &self,
        interface: &mut impl CanInterface,
        target: NmtTarget,
    ) -> Result<(), CanOpenError> {
        debug!("[NMT] Sending node guard to node {}", target.wire_id());
        let frame = NodeGuardRequest::new(target).to_frame();
        interface.send_frame(&frame)
    }

    /// Invalidates the belief for `target` and polls it with a node guard.
    ///
    /// For a single node the one entry is marked `Unknown`; for `AllNodes`
    /// every entry is marked and a single frame on the broadcast guard
    /// identifier queries the whole bus (each slave replies individually).
    ///
    /// The table is always marked before the frame is handed to the
    /// transport, so a reply processed by the receive path can never observe
    /// a table that does not yet reflect the outstanding query. The mark
    /// therefore persists even when the send fails.
    pub fn request_node_state(
        &mut self,
        interface: &mut impl CanInterface,
        target: NmtTarget,
    ) -> Result<(), CanOpenError> {
        match target {
            NmtTarget::Node(node) => self.table.set_unknown(node),
            NmtTarget::AllNodes => self.table.set_all_unknown(),
        }
        self.send_node_guard(interface, target)
    }

    /// The state currently believed for `node`.
    pub fn node_state(&self, node: NodeId) -> NodeState {
        self.table.get(node)
    }

    /// Read access to the belief table.
    pub fn table(&self) -> &NodeStateTable {
        &self.table
    }

    /// Write access for the receive-side guard handler, which records
    /// confirmed states after validating replies.
    pub fn table_mut(&mut self) -> &mut NodeStateTable {
        &mut self.table
    }
}

// --- Unit Tests ---

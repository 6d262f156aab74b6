use crate::frame::can::{CanFrame, CobId};
use crate::frame::codec::CanCodec;
use crate::hal::CanOpenError;
use crate::nmt::states::NodeState;
use crate::types::{C_FN_NODE_GUARD, NmtTarget, NodeId};

/// A node-guarding poll issued by the master.
/// (CiA 301, Section 7.2.8.3.2.1)
///
/// Encoded as a remote-transmission request on COB-ID 700h + node id, with a
/// DLC of 1 announcing the single status byte the slave will supply. The
/// requester itself puts no data bytes on the wire. With a broadcast target
/// the node-id field is 0 and a single frame queries every device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeGuardRequest {
    pub target: NmtTarget,
}

impl NodeGuardRequest {
    /// Creates a guard poll for the given target.
    pub fn new(target: NmtTarget) -> Self {
        NodeGuardRequest { target }
    }
}

impl CanCodec for NodeGuardRequest {
    fn to_frame(&self) -> CanFrame {
        CanFrame::remote(CobId::new(C_FN_NODE_GUARD, self.target.wire_id()), 1)
    }

    fn from_frame(frame: &CanFrame) -> Result<Self, CanOpenError> {
        if !frame.cob_id.is_node_guard() || !frame.rtr {
            return Err(CanOpenError::InvalidFrame);
        }
        let target = NmtTarget::from_wire_id(frame.cob_id.node_id_field())?;
        Ok(NodeGuardRequest { target })
    }
}

/// A guard status reply produced by a slave.
/// (CiA 301, Section 7.2.8.3.2.2)
///
/// A data frame on the slave's own 700h + node id identifier. The single
/// data byte carries the toggle bit (bit 7) and the NMT state (bits 6-0).
/// This type only defines the wire shape; tracking the expected toggle value
/// and reconciling the state table on reception belong to the receive-side
/// guard handler, which feeds its verdict back through
/// [`NodeStateTable::set`](crate::nmt::master::NodeStateTable::set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeGuardReply {
    pub node: NodeId,
    pub state: NodeState,
    pub toggle: bool,
}

impl CanCodec for NodeGuardReply {
    fn to_frame(&self) -> CanFrame {
        let status = (self.state as u8) | if self.toggle { 0x80 } else { 0x00 };
        CanFrame {
            cob_id: CobId::new(C_FN_NODE_GUARD, self.node.0),
            rtr: false,
            dlc: 1,
            data: [status, 0, 0, 0, 0, 0, 0, 0],
        }
    }

    fn from_frame(frame: &CanFrame) -> Result<Self, CanOpenError> {
        if !frame.cob_id.is_node_guard() || frame.rtr || frame.dlc != 1 {
            return Err(CanOpenError::InvalidFrame);
        }
        let node = NodeId::try_from(frame.cob_id.node_id_field())?;
        let status = frame.data[0];
        let state = NodeState::try_from(status & 0x7F)?;
        Ok(NodeGuardReply {
            node,
            state,
            toggle: (status & 0x80) != 0,
        })
    }
}

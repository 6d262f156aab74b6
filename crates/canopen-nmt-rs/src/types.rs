use core::convert::TryFrom;
use core::fmt;

// --- Protocol Constants (CiA 301) ---

/// Number of slots in the node state table (valid Node IDs are 1-127;
/// slot 0 is kept so the table can be indexed directly by Node ID).
pub const C_NMT_MAX_NODE_ID: usize = 128;

/// Highest valid CANopen Node ID (127 or 7Fh).
pub const C_ADR_MAX_NODE_ID: u8 = 127;

/// Function code for NMT module control frames (COB-ID 000h).
pub const C_FN_NMT: u8 = 0x0;

/// Function code for node guarding / heartbeat frames (COB-ID 700h + Node ID).
pub const C_FN_NODE_GUARD: u8 = 0xE;

/// Represents a CANopen Node ID, wrapping a `u8` to ensure type safety.
///
/// Valid Node IDs are in the range 1-127. The value 0 is the broadcast
/// address of NMT services and is never a device's own identifier; broadcast
/// addressing is expressed through [`NmtTarget::AllNodes`] instead, so a
/// `NodeId` always denotes a single concrete device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u8);

/// Error type for invalid Node ID creation.
#[derive(Debug, PartialEq, Eq)]
pub enum NodeIdError {
    /// Node ID is outside the valid range (1-127).
    InvalidRange(u8),
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdError::InvalidRange(value) => {
                write!(f, "Invalid NodeId value: {}. Valid range is 1-127.", value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeIdError {}

impl TryFrom<u8> for NodeId {
    type Error = NodeIdError;

    /// Creates a `NodeId` from a `u8`, returning an error if the value is not
    /// a valid CANopen node identifier (1-127).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=C_ADR_MAX_NODE_ID => Ok(NodeId(value)),
            _ => Err(NodeIdError::InvalidRange(value)),
        }
    }
}

impl From<NodeId> for u8 {
    /// Converts a `NodeId` back into its underlying `u8` representation.
    /// This conversion is infallible.
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addressing of a master-issued NMT service.
///
/// CANopen reuses the node-id byte 0 as "all nodes" on the wire. Keeping the
/// two cases as distinct variants means the broadcast marker can never be
/// mistaken for a per-device table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NmtTarget {
    /// A single slave device.
    Node(NodeId),
    /// Every device on the bus (wire encoding 0).
    AllNodes,
}

impl NmtTarget {
    /// The node-id byte placed on the wire for this target.
    pub fn wire_id(&self) -> u8 {
        match self {
            NmtTarget::Node(id) => id.0,
            NmtTarget::AllNodes => 0,
        }
    }

    /// Decodes a wire node-id byte (0 = all nodes) back into a target.
    pub fn from_wire_id(value: u8) -> Result<Self, NodeIdError> {
        if value == 0 {
            Ok(NmtTarget::AllNodes)
        } else {
            Ok(NmtTarget::Node(NodeId::try_from(value)?))
        }
    }
}

impl From<NodeId> for NmtTarget {
    fn from(node_id: NodeId) -> Self {
        NmtTarget::Node(node_id)
    }
}

use core::fmt;

/// The master's belief about a slave's NMT state.
///
/// The four confirmed states carry the status values a slave reports in its
/// guard reply (CiA 301, Section 7.2.8.3.2.2). `Unknown` is a pseudo-state
/// local to the master: it marks an entry whose guard reply is outstanding
/// and is never placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum NodeState {
    /// The slave reported boot-up / initialisation.
    Initialising = 0x00,
    /// The slave is stopped; only NMT and guarding services are active.
    Stopped = 0x04,
    /// The slave is fully operational, PDO transfer is active.
    Operational = 0x05,
    /// The slave can be configured via SDO but exchanges no PDOs.
    PreOperational = 0x7F,
    /// No confirmed state; a guard request has been issued and the reply is
    /// not yet reflected here.
    #[default]
    Unknown = 0x0F,
}

impl NodeState {
    /// Whether this is a state attested by a guard exchange, as opposed to
    /// the outstanding-query marker.
    pub fn is_confirmed(&self) -> bool {
        !matches!(self, NodeState::Unknown)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::Initialising => "Initialising",
            NodeState::Stopped => "Stopped",
            NodeState::Operational => "Operational",
            NodeState::PreOperational => "Pre-operational",
            NodeState::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// Error type for a status byte that does not name a reportable NMT state.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidNodeStateValue(pub u8);

impl fmt::Display for InvalidNodeStateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid NMT node state value: {:#04x}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidNodeStateValue {}

impl TryFrom<u8> for NodeState {
    type Error = InvalidNodeStateValue;

    /// Decodes a reported status value. Only the four states a slave can
    /// actually report are accepted; `Unknown` never appears on the wire.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(NodeState::Initialising),
            0x04 => Ok(NodeState::Stopped),
            0x05 => Ok(NodeState::Operational),
            0x7F => Ok(NodeState::PreOperational),
            _ => Err(InvalidNodeStateValue(value)),
        }
    }
}

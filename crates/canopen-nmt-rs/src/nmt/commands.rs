use core::fmt;

/// NMT command specifiers the master may place in a module-control frame.
/// (CiA 301, Table 39)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NmtCommand {
    /// Commands the target into the Operational state.
    StartRemoteNode = 0x01,
    /// Commands the target into the Stopped state.
    StopRemoteNode = 0x02,
    /// Commands the target into the Pre-operational state.
    EnterPreOperational = 0x80,
    /// Commands a full application reset of the target.
    ResetNode = 0x81,
    /// Commands a reset of the target's communication parameters.
    ResetCommunication = 0x82,
}

/// Error type for a byte that is not a known NMT command specifier.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidCommandSpecifier(pub u8);

impl fmt::Display for InvalidCommandSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid NMT command specifier: {:#04x}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCommandSpecifier {}

impl TryFrom<u8> for NmtCommand {
    type Error = InvalidCommandSpecifier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(NmtCommand::StartRemoteNode),
            0x02 => Ok(NmtCommand::StopRemoteNode),
            0x80 => Ok(NmtCommand::EnterPreOperational),
            0x81 => Ok(NmtCommand::ResetNode),
            0x82 => Ok(NmtCommand::ResetCommunication),
            _ => Err(InvalidCommandSpecifier(value)),
        }
    }
}

use crate::frame::can::{CanFrame, CobId};
use crate::frame::codec::CanCodec;
use crate::hal::CanOpenError;
use crate::nmt::commands::NmtCommand;
use crate::types::{C_FN_NMT, NmtTarget};

/// An NMT module-control frame (master to slave(s)).
/// (CiA 301, Section 7.2.8.3.1)
///
/// Always carried on COB-ID 000h with two data bytes: the command specifier
/// followed by the addressed node id, where 0 addresses every node. The
/// specifier is passed through as given; whether the commanded transition is
/// legal for the target's current state is the device's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NmtCommandFrame {
    pub command: NmtCommand,
    pub target: NmtTarget,
}

impl NmtCommandFrame {
    /// Creates a module-control frame for the given command and target.
    pub fn new(command: NmtCommand, target: NmtTarget) -> Self {
        NmtCommandFrame { command, target }
    }
}

impl CanCodec for NmtCommandFrame {
    fn to_frame(&self) -> CanFrame {
        CanFrame {
            cob_id: CobId::new(C_FN_NMT, 0),
            rtr: false,
            dlc: 2,
            data: [self.command as u8, self.target.wire_id(), 0, 0, 0, 0, 0, 0],
        }
    }

    fn from_frame(frame: &CanFrame) -> Result<Self, CanOpenError> {
        if !frame.cob_id.is_nmt() || frame.rtr || frame.dlc != 2 {
            return Err(CanOpenError::InvalidFrame);
        }
        let command = NmtCommand::try_from(frame.data[0])?;
        let target = NmtTarget::from_wire_id(frame.data[1])?;
        Ok(NmtCommandFrame { command, target })
    }
}

use crate::frame::CanFrame;
use crate::nmt::commands::InvalidCommandSpecifier;
use crate::nmt::states::InvalidNodeStateValue;
use crate::types::NodeIdError;
use core::fmt;

/// Defines a portable, descriptive Error type for the CANopen stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanOpenError {
    /// An underlying I/O error occurred.
    IoError,
    /// The interface is not yet configured or ready to transmit/receive.
    NotReady,
    /// The payload exceeds the 8 data bytes a CAN frame can carry.
    FrameTooLarge,
    /// A received frame does not have the shape expected by the decoder
    /// (wrong COB-ID, RTR flag, or data length).
    InvalidFrame,
    /// A value in a frame is not a valid NodeId.
    InvalidNodeId(u8),
    /// A value in a frame is not a valid NMT command specifier.
    InvalidNmtCommand(u8),
    /// A value in a frame is not a valid NMT node state.
    InvalidNodeState(u8),
}

impl fmt::Display for CanOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError => write!(f, "An underlying I/O error occurred"),
            Self::NotReady => write!(f, "Interface is not ready or configured"),
            Self::FrameTooLarge => write!(f, "Payload exceeds the 8-byte CAN frame limit"),
            Self::InvalidFrame => write!(f, "Frame shape does not match the expected service"),
            Self::InvalidNodeId(v) => write!(f, "Invalid NodeId value: {v}"),
            Self::InvalidNmtCommand(v) => write!(f, "Invalid NMT command specifier: {v:#04x}"),
            Self::InvalidNodeState(v) => write!(f, "Invalid NMT node state value: {v:#04x}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CanOpenError {}

// --- From Implementations for Error Conversion ---

impl From<NodeIdError> for CanOpenError {
    fn from(err: NodeIdError) -> Self {
        match err {
            NodeIdError::InvalidRange(val) => CanOpenError::InvalidNodeId(val),
        }
    }
}

impl From<InvalidCommandSpecifier> for CanOpenError {
    fn from(err: InvalidCommandSpecifier) -> Self {
        CanOpenError::InvalidNmtCommand(err.0)
    }
}

impl From<InvalidNodeStateValue> for CanOpenError {
    fn from(err: InvalidNodeStateValue) -> Self {
        CanOpenError::InvalidNodeState(err.0)
    }
}

/// Hardware Abstraction Layer (HAL) for CAN frame transmission.
///
/// This trait abstracts the physical sending and receiving of CAN frames,
/// enabling the core CANopen protocol logic to remain platform-agnostic
/// (no_std). The master propagates the `Result` of [`send_frame`] to its
/// caller unchanged; it performs no retry or recovery of its own.
///
/// [`send_frame`]: CanInterface::send_frame
pub trait CanInterface {
    /// Sends a single CAN frame over the bus.
    fn send_frame(&mut self, frame: &CanFrame) -> Result<(), CanOpenError>;

    /// Attempts to receive a single CAN frame.
    ///
    /// Returns `Ok(None)` if no frame is currently available; implementations
    /// must not block indefinitely so the surrounding stack can interleave
    /// transmission and reception in one dispatch loop.
    fn receive_frame(&mut self) -> Result<Option<CanFrame>, CanOpenError>;
}

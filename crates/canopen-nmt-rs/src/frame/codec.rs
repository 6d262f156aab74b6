use crate::frame::CanFrame;
use crate::hal::CanOpenError;

/// A trait for typed service frames that can be converted to and from the
/// raw [`CanFrame`] handed to the transport.
pub trait CanCodec: Sized {
    /// Assembles the wire frame for this service. The builders are pure;
    /// transmission is the caller's business.
    fn to_frame(&self) -> CanFrame;

    /// Decodes a received frame, checking COB-ID, RTR flag and data length
    /// before interpreting the payload.
    fn from_frame(frame: &CanFrame) -> Result<Self, CanOpenError>;
}
